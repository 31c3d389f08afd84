use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::media::{MediaType, MetadataRecord};

/// Highest rating a user can give
pub const MAX_USER_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub external_id: String,
    pub title: String,
    pub year: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub external_rating: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
    /// 0-5 stars, `None` until the user rates the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
    pub added_at: DateTime<Utc>,
}

impl WatchlistEntry {
    pub fn from_metadata(record: MetadataRecord, added_at: DateTime<Utc>) -> Self {
        Self {
            external_id: record.external_id,
            title: record.title,
            year: record.year,
            poster: record.poster,
            plot: record.plot,
            genre: record.genre,
            director: record.director,
            cast: record.cast,
            external_rating: record.external_rating,
            runtime: record.runtime,
            media_type: record.media_type,
            user_rating: None,
            added_at,
        }
    }

    /// A rating of 0 counts as unrated
    pub fn is_rated(&self) -> bool {
        self.user_rating.map_or(false, |r| r > 0)
    }

    pub fn is_highly_rated(&self) -> bool {
        self.user_rating.map_or(false, |r| r >= 4)
    }

    /// View of this entry as provider metadata (for prompts and chat context)
    pub fn to_metadata(&self) -> MetadataRecord {
        MetadataRecord {
            external_id: self.external_id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster: self.poster.clone(),
            plot: self.plot.clone(),
            genre: self.genre.clone(),
            director: self.director.clone(),
            cast: self.cast.clone(),
            external_rating: self.external_rating.clone(),
            runtime: self.runtime.clone(),
            media_type: self.media_type.clone(),
        }
    }
}
