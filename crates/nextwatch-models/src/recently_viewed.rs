use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::media::{MediaType, MetadataRecord};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentlyViewedEntry {
    pub external_id: String,
    pub title: String,
    pub year: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
    pub viewed_at: DateTime<Utc>,
}

impl RecentlyViewedEntry {
    pub fn from_metadata(record: &MetadataRecord, viewed_at: DateTime<Utc>) -> Self {
        Self {
            external_id: record.external_id.clone(),
            title: record.title.clone(),
            year: record.year.clone(),
            poster: record.poster.clone(),
            media_type: record.media_type.clone(),
            viewed_at,
        }
    }
}
