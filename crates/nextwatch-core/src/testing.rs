//! Fakes shared by the core unit tests

use async_trait::async_trait;
use chrono::Utc;
use nextwatch_models::{ChatMessage, MediaType, MetadataRecord, SearchResult, WatchlistEntry};
use nextwatch_sources::{LanguageModel, LlmError, MetadataProvider};
use std::collections::HashMap;
use std::sync::Mutex;

pub fn sample_record(external_id: &str, title: &str) -> MetadataRecord {
    MetadataRecord {
        external_id: external_id.to_string(),
        title: title.to_string(),
        year: "2021".to_string(),
        poster: Some(format!("https://img.example/{}.jpg", external_id)),
        plot: Some(format!("The story of {}.", title)),
        genre: Some("Drama, Romance".to_string()),
        director: Some("Kim Hee-won".to_string()),
        cast: Some("Song Joong-ki, Jeon Yeo-been".to_string()),
        external_rating: Some("8.4".to_string()),
        runtime: Some("80 min".to_string()),
        media_type: MediaType::Series,
    }
}

pub fn sample_entry(external_id: &str, title: &str, rating: Option<u8>) -> WatchlistEntry {
    let mut entry = WatchlistEntry::from_metadata(sample_record(external_id, title), Utc::now());
    entry.user_rating = rating;
    entry
}

/// Metadata provider answering from an in-memory catalogue, keyed by
/// lowercase title and by id
#[derive(Default)]
pub struct FakeMetadata {
    by_title: HashMap<String, MetadataRecord>,
    search_results: Vec<SearchResult>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, record: MetadataRecord) -> Self {
        self.by_title.insert(record.title.to_lowercase(), record);
        self
    }

    pub fn with_search_result(mut self, external_id: &str, title: &str) -> Self {
        self.search_results.push(SearchResult {
            external_id: external_id.to_string(),
            title: title.to_string(),
            year: "2020".to_string(),
            media_type: MediaType::Series,
            poster: None,
        });
        self
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MetadataProvider for FakeMetadata {
    async fn search(&self, query: &str) -> Vec<SearchResult> {
        self.record(format!("search:{}", query));
        self.search_results.clone()
    }

    async fn lookup_by_title(&self, title: &str, _year: Option<&str>) -> Option<MetadataRecord> {
        self.record(format!("title:{}", title));
        self.by_title.get(&title.to_lowercase()).cloned()
    }

    async fn lookup_by_id(&self, external_id: &str) -> Option<MetadataRecord> {
        self.record(format!("id:{}", external_id));
        if let Some(found) = self.by_title.values().find(|r| r.external_id == external_id) {
            return Some(found.clone());
        }
        self.search_results
            .iter()
            .find(|r| r.external_id == external_id)
            .map(|r| sample_record(&r.external_id, &r.title))
    }
}

/// Language model returning a canned reply and recording every call
pub struct FakeModel {
    reply: Result<String, LlmError>,
    pub prompts: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(String, Vec<ChatMessage>)> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn converse(&self, prompt: &str, history: &[ChatMessage]) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), history.to_vec()));
        self.reply.clone()
    }
}
