use anyhow::Result;
use chrono::Utc;
use nextwatch_models::{
    ChatMessage, HomeContent, MetadataRecord, RecentlyViewedEntry, RecommendationRecord, WatchlistEntry,
};
use nextwatch_sources::CredentialSource;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

/// Most recently viewed titles kept
pub const RECENTLY_VIEWED_LIMIT: usize = 10;

/// The fixed set of keys owned by this application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    ApiKey,
    Watchlist,
    ChatHistory,
    DarkMode,
    Recommendations,
    ActiveTab,
    HomeContent,
    SimilarShows,
    RecentlyViewed,
}

impl StorageKey {
    pub const ALL: [StorageKey; 9] = [
        StorageKey::ApiKey,
        StorageKey::Watchlist,
        StorageKey::ChatHistory,
        StorageKey::DarkMode,
        StorageKey::Recommendations,
        StorageKey::ActiveTab,
        StorageKey::HomeContent,
        StorageKey::SimilarShows,
        StorageKey::RecentlyViewed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::ApiKey => "nextwatch_gemini_api_key",
            StorageKey::Watchlist => "nextwatch_watchlist",
            StorageKey::ChatHistory => "nextwatch_chat_history",
            StorageKey::DarkMode => "nextwatch_dark_mode",
            StorageKey::Recommendations => "nextwatch_recommendations",
            StorageKey::ActiveTab => "nextwatch_active_tab",
            StorageKey::HomeContent => "nextwatch_home_content",
            StorageKey::SimilarShows => "nextwatch_similar_shows",
            StorageKey::RecentlyViewed => "nextwatch_recently_viewed",
        }
    }
}

/// View the user last looked at; reopened when no command is given
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Home,
    Watchlist,
    Recommendations,
    Recent,
}

/// Raw string storage under string keys
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// One JSON file per key inside a directory
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, value)?;
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| anyhow::anyhow!("storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| anyhow::anyhow!("storage lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| anyhow::anyhow!("storage lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// Fail-soft JSON store over a [`StorageBackend`].
///
/// Nothing here returns an error: reads fall back to the caller's default and
/// writes report success as a `bool`. Read-modify-write helpers are not atomic;
/// two overlapping updates can lose one of them.
pub struct Store {
    backend: Arc<dyn StorageBackend>,
}

impl Store {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by JSON files under `dir`
    pub fn open(dir: PathBuf) -> Self {
        Self::new(Arc::new(FileBackend::new(dir)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    pub fn get<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        match self.backend.read(key.as_str()) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key = key.as_str(), error = %e, "Storage load error, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                error!(key = key.as_str(), error = %e, "Storage load error");
                default
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> bool {
        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(e) => {
                error!(key = key.as_str(), error = %e, "Storage save error: could not serialize");
                return false;
            }
        };

        match self.backend.write(key.as_str(), &serialized) {
            Ok(()) => {
                debug!(key = key.as_str(), bytes = serialized.len(), "Storage saved");
                true
            }
            Err(e) => {
                error!(key = key.as_str(), error = %e, "Storage save error");
                false
            }
        }
    }

    pub fn remove(&self, key: StorageKey) -> bool {
        match self.backend.delete(key.as_str()) {
            Ok(()) => true,
            Err(e) => {
                error!(key = key.as_str(), error = %e, "Storage remove error");
                false
            }
        }
    }

    /// Remove every application key; other data in the backend is left alone
    pub fn clear_all(&self) -> bool {
        let mut ok = true;
        for key in StorageKey::ALL {
            ok &= self.remove(key);
        }
        ok
    }

    // Watchlist

    pub fn watchlist(&self) -> Vec<WatchlistEntry> {
        self.get(StorageKey::Watchlist, Vec::new())
    }

    pub fn save_watchlist(&self, watchlist: &[WatchlistEntry]) -> bool {
        self.set(StorageKey::Watchlist, watchlist)
    }

    pub fn find_in_watchlist(&self, external_id: &str) -> Option<WatchlistEntry> {
        self.watchlist().into_iter().find(|e| e.external_id == external_id)
    }

    /// Append an entry stamped with the current time. Rejects duplicate ids.
    pub fn add_to_watchlist(&self, mut entry: WatchlistEntry) -> bool {
        let mut watchlist = self.watchlist();
        if watchlist.iter().any(|e| e.external_id == entry.external_id) {
            return false;
        }

        entry.added_at = Utc::now();
        watchlist.push(entry);
        self.save_watchlist(&watchlist)
    }

    /// Returns false when the id was not in the watchlist
    pub fn remove_from_watchlist(&self, external_id: &str) -> bool {
        let watchlist = self.watchlist();
        let before = watchlist.len();
        let remaining: Vec<WatchlistEntry> = watchlist
            .into_iter()
            .filter(|e| e.external_id != external_id)
            .collect();

        if remaining.len() == before {
            return false;
        }
        self.save_watchlist(&remaining)
    }

    pub fn update_watchlist_entry<F>(&self, external_id: &str, update: F) -> bool
    where
        F: FnOnce(&mut WatchlistEntry),
    {
        let mut watchlist = self.watchlist();
        match watchlist.iter_mut().find(|e| e.external_id == external_id) {
            Some(entry) => {
                update(entry);
                self.save_watchlist(&watchlist)
            }
            None => false,
        }
    }

    // Chat history, keyed by external id

    fn all_chat_history(&self) -> HashMap<String, Vec<ChatMessage>> {
        self.get(StorageKey::ChatHistory, HashMap::new())
    }

    pub fn chat_history(&self, external_id: &str) -> Vec<ChatMessage> {
        self.all_chat_history().remove(external_id).unwrap_or_default()
    }

    pub fn save_chat_history(&self, external_id: &str, history: &[ChatMessage]) -> bool {
        let mut all = self.all_chat_history();
        all.insert(external_id.to_string(), history.to_vec());
        self.set(StorageKey::ChatHistory, &all)
    }

    pub fn clear_chat_history(&self, external_id: &str) -> bool {
        let mut all = self.all_chat_history();
        if all.remove(external_id).is_some() {
            return self.set(StorageKey::ChatHistory, &all);
        }
        true
    }

    pub fn clear_all_chat_history(&self) -> bool {
        self.set(StorageKey::ChatHistory, &HashMap::<String, Vec<ChatMessage>>::new())
    }

    // Settings

    pub fn api_key(&self) -> Option<String> {
        self.get(StorageKey::ApiKey, None)
    }

    pub fn save_api_key(&self, api_key: &str) -> bool {
        self.set(StorageKey::ApiKey, api_key)
    }

    pub fn dark_mode(&self) -> bool {
        self.get(StorageKey::DarkMode, false)
    }

    pub fn save_dark_mode(&self, enabled: bool) -> bool {
        self.set(StorageKey::DarkMode, &enabled)
    }

    pub fn active_view(&self) -> ActiveView {
        self.get(StorageKey::ActiveTab, ActiveView::default())
    }

    pub fn save_active_view(&self, view: ActiveView) -> bool {
        self.set(StorageKey::ActiveTab, &view)
    }

    // Caches

    pub fn recommendations(&self) -> Vec<RecommendationRecord> {
        self.get(StorageKey::Recommendations, Vec::new())
    }

    pub fn save_recommendations(&self, recommendations: &[RecommendationRecord]) -> bool {
        self.set(StorageKey::Recommendations, recommendations)
    }

    pub fn clear_recommendations(&self) -> bool {
        self.save_recommendations(&[])
    }

    pub fn home_content(&self) -> HomeContent {
        self.get(StorageKey::HomeContent, HomeContent::default())
    }

    pub fn save_home_content(&self, content: &HomeContent) -> bool {
        self.set(StorageKey::HomeContent, content)
    }

    pub fn clear_home_content(&self) -> bool {
        self.save_home_content(&HomeContent::default())
    }

    fn all_similar_titles(&self) -> HashMap<String, Vec<MetadataRecord>> {
        self.get(StorageKey::SimilarShows, HashMap::new())
    }

    pub fn similar_titles(&self, external_id: &str) -> Vec<MetadataRecord> {
        self.all_similar_titles().remove(external_id).unwrap_or_default()
    }

    pub fn save_similar_titles(&self, external_id: &str, titles: &[MetadataRecord]) -> bool {
        let mut all = self.all_similar_titles();
        all.insert(external_id.to_string(), titles.to_vec());
        self.set(StorageKey::SimilarShows, &all)
    }

    pub fn clear_similar_titles(&self, external_id: &str) -> bool {
        let mut all = self.all_similar_titles();
        if all.remove(external_id).is_some() {
            return self.set(StorageKey::SimilarShows, &all);
        }
        true
    }

    pub fn recently_viewed(&self) -> Vec<RecentlyViewedEntry> {
        self.get(StorageKey::RecentlyViewed, Vec::new())
    }

    /// Move (or insert) the title to the front, keeping at most ten entries
    pub fn add_to_recently_viewed(&self, record: &MetadataRecord) -> bool {
        let mut recent: Vec<RecentlyViewedEntry> = self
            .recently_viewed()
            .into_iter()
            .filter(|e| e.external_id != record.external_id)
            .collect();

        recent.insert(0, RecentlyViewedEntry::from_metadata(record, Utc::now()));
        recent.truncate(RECENTLY_VIEWED_LIMIT);
        self.set(StorageKey::RecentlyViewed, &recent)
    }
}

impl CredentialSource for Store {
    fn stored_api_key(&self) -> Option<String> {
        self.api_key()
    }
}
