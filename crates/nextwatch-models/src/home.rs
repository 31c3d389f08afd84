use serde::{Deserialize, Serialize};
use crate::media::MetadataRecord;

/// A named shelf of titles on the home view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HomeSection {
    pub name: String,
    pub items: Vec<MetadataRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HomeContent {
    #[serde(default)]
    pub trending: Vec<MetadataRecord>,
    #[serde(default)]
    pub sections: Vec<HomeSection>,
}

impl HomeContent {
    pub fn is_empty(&self) -> bool {
        self.trending.is_empty() && self.sections.iter().all(|s| s.items.is_empty())
    }
}
