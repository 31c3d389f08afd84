use crate::store::Store;
use chrono::Utc;
use nextwatch_models::{WatchlistEntry, MAX_USER_RATING};
use nextwatch_sources::MetadataProvider;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// How many entries the `recent` filter shows
const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchlistFilter {
    #[default]
    All,
    Rated,
    Unrated,
    /// Newest additions first
    Recent,
}

#[derive(Debug)]
pub enum AddOutcome {
    Added(WatchlistEntry),
    AlreadyPresent,
    NotFound,
}

/// Watchlist operations that need more than a single store call
pub struct WatchlistService {
    store: Arc<Store>,
    metadata: Arc<dyn MetadataProvider>,
}

impl WatchlistService {
    pub fn new(store: Arc<Store>, metadata: Arc<dyn MetadataProvider>) -> Self {
        Self { store, metadata }
    }

    /// Fetch full details for `external_id` and append it to the watchlist
    pub async fn add(&self, external_id: &str) -> AddOutcome {
        if self.store.find_in_watchlist(external_id).is_some() {
            return AddOutcome::AlreadyPresent;
        }

        let Some(record) = self.metadata.lookup_by_id(external_id).await else {
            warn!(external_id = %external_id, "Cannot add unknown title to watchlist");
            return AddOutcome::NotFound;
        };

        let entry = WatchlistEntry::from_metadata(record, Utc::now());
        if self.store.add_to_watchlist(entry.clone()) {
            info!(external_id = %external_id, title = %entry.title, "Added to watchlist");
            AddOutcome::Added(entry)
        } else {
            AddOutcome::AlreadyPresent
        }
    }

    /// Removing a rated title invalidates cached recommendations
    pub fn remove(&self, external_id: &str) -> bool {
        let was_rated = self
            .store
            .find_in_watchlist(external_id)
            .map_or(false, |e| e.is_rated());

        let removed = self.store.remove_from_watchlist(external_id);
        if removed && was_rated {
            self.store.clear_recommendations();
        }
        removed
    }

    /// Ratings above five are rejected; zero clears the rating
    pub fn set_rating(&self, external_id: &str, rating: u8) -> bool {
        if rating > MAX_USER_RATING {
            warn!(rating, "Rating out of range");
            return false;
        }

        let updated = self
            .store
            .update_watchlist_entry(external_id, |entry| entry.user_rating = Some(rating));
        if updated {
            info!(external_id = %external_id, rating, "Rating updated");
            self.store.clear_recommendations();
        }
        updated
    }

    pub fn clear(&self) -> bool {
        let had_ratings = self.store.watchlist().iter().any(|e| e.is_rated());
        let cleared = self.store.save_watchlist(&[]);
        if cleared && had_ratings {
            self.store.clear_recommendations();
        }
        cleared
    }

    pub fn list(&self, filter: WatchlistFilter) -> Vec<WatchlistEntry> {
        let watchlist = self.store.watchlist();
        match filter {
            WatchlistFilter::All => watchlist,
            WatchlistFilter::Rated => watchlist.into_iter().filter(|e| e.is_rated()).collect(),
            WatchlistFilter::Unrated => watchlist.into_iter().filter(|e| !e.is_rated()).collect(),
            WatchlistFilter::Recent => {
                let mut recent = watchlist;
                recent.sort_by(|a, b| b.added_at.cmp(&a.added_at));
                recent.truncate(RECENT_LIMIT);
                recent
            }
        }
    }
}

fn leading_year(year: &str) -> Option<u32> {
    let digits: String = year.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}

/// Group entries by the first year they aired, newest year first.
/// Entries without a readable year end up in a trailing "Unknown" group.
pub fn group_by_year(entries: Vec<WatchlistEntry>) -> Vec<(String, Vec<WatchlistEntry>)> {
    let mut by_year: BTreeMap<u32, Vec<WatchlistEntry>> = BTreeMap::new();
    let mut unknown = Vec::new();

    for entry in entries {
        match leading_year(&entry.year) {
            Some(year) => by_year.entry(year).or_default().push(entry),
            None => unknown.push(entry),
        }
    }

    let mut groups: Vec<(String, Vec<WatchlistEntry>)> = by_year
        .into_iter()
        .rev()
        .map(|(year, entries)| (year.to_string(), entries))
        .collect();
    if !unknown.is_empty() {
        groups.push(("Unknown".to_string(), unknown));
    }
    groups
}
