use crate::catalog::{buckets_for_genres, Bucket, BUCKETS};
use crate::queue::RequestQueue;
use crate::store::Store;
use nextwatch_models::MetadataRecord;
use nextwatch_sources::MetadataProvider;
use std::sync::Arc;
use tracing::{debug, info};

const MAX_CANDIDATE_TITLES: usize = 10;
/// Below this many hits the primary genre is searched as well
const MIN_SIMILAR: usize = 5;

/// Curated titles related to `record` by genre, excluding the record itself
pub fn candidate_titles(record: &MetadataRecord) -> Vec<&'static str> {
    let mut buckets = buckets_for_genres(record.genres());
    if buckets.is_empty() {
        buckets = BUCKETS.iter().collect::<Vec<&Bucket>>();
    }

    let current = record.title.to_lowercase();
    let mut titles: Vec<&'static str> = Vec::new();
    for title in buckets.iter().flat_map(|b| b.titles.iter().copied()) {
        if title.to_lowercase() != current && !titles.contains(&title) {
            titles.push(title);
        }
    }
    titles.truncate(MAX_CANDIDATE_TITLES);
    titles
}

/// "More like this" lists, cached per external id
pub struct SimilarTitles {
    store: Arc<Store>,
    metadata: Arc<dyn MetadataProvider>,
    queue: RequestQueue,
}

impl SimilarTitles {
    pub fn new(store: Arc<Store>, metadata: Arc<dyn MetadataProvider>, queue: RequestQueue) -> Self {
        Self { store, metadata, queue }
    }

    pub async fn for_title(&self, record: &MetadataRecord, refresh: bool) -> Vec<MetadataRecord> {
        if refresh {
            self.store.clear_similar_titles(&record.external_id);
        } else {
            let cached = self.store.similar_titles(&record.external_id);
            if !cached.is_empty() {
                debug!(external_id = %record.external_id, count = cached.len(), "Using cached similar titles");
                return cached;
            }
        }

        let found = self.find(record).await;
        if !found.is_empty() {
            self.store.save_similar_titles(&record.external_id, &found);
        }
        found
    }

    pub async fn find(&self, record: &MetadataRecord) -> Vec<MetadataRecord> {
        let titles = candidate_titles(record);
        let lookups = self
            .queue
            .run(titles, |title| {
                let metadata = Arc::clone(&self.metadata);
                async move { metadata.lookup_by_title(title, None).await }
            })
            .await;

        let mut similar: Vec<MetadataRecord> = Vec::new();
        for found in lookups.into_iter().flatten() {
            if found.external_id != record.external_id
                && !similar.iter().any(|s| s.external_id == found.external_id)
            {
                similar.push(found);
            }
        }

        if similar.len() < MIN_SIMILAR {
            if let Some(primary) = record.genres().first().copied() {
                info!(genre = %primary, found = similar.len(), "Topping up similar titles by genre search");
                let extra_ids: Vec<String> = self
                    .metadata
                    .search(primary)
                    .await
                    .into_iter()
                    .filter(|r| r.external_id != record.external_id)
                    .filter(|r| !similar.iter().any(|s| s.external_id == r.external_id))
                    .map(|r| r.external_id)
                    .take(MIN_SIMILAR)
                    .collect();

                let extras = self
                    .queue
                    .run(extra_ids, |id| {
                        let metadata = Arc::clone(&self.metadata);
                        async move { metadata.lookup_by_id(&id).await }
                    })
                    .await;
                similar.extend(extras.into_iter().flatten());
            }
        }

        similar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_record, FakeMetadata};
    use std::time::Duration;

    fn record_with_genre(id: &str, title: &str, genre: &str) -> MetadataRecord {
        let mut record = sample_record(id, title);
        record.genre = Some(genre.to_string());
        record
    }

    #[test]
    fn test_candidate_titles_excludes_current_and_dedupes() {
        let record = record_with_genre("tt1", "vincenzo", "Crime");
        assert_eq!(candidate_titles(&record), vec!["Vagabond", "Crash Landing on You", "A Time Called You"]);

        let drama = record_with_genre("tt2", "Other", "Drama, Thriller");
        let titles = candidate_titles(&drama);
        assert_eq!(titles.len(), 10);
        assert_eq!(titles.iter().filter(|t| **t == "Crash Landing on You").count(), 1);
    }

    #[test]
    fn test_unmapped_genre_uses_every_bucket() {
        let record = record_with_genre("tt1", "Something", "Documentary");
        assert_eq!(candidate_titles(&record)[0], "My Demon");
    }

    #[tokio::test]
    async fn test_find_tops_up_with_genre_search() {
        let store = Arc::new(Store::in_memory());
        let metadata = Arc::new(
            FakeMetadata::new()
                .with_title(sample_record("tt50", "Vagabond"))
                .with_title(sample_record("tt1", "Crash Landing on You"))
                .with_search_result("tt1", "Crash Landing on You")
                .with_search_result("tt50", "Vagabond")
                .with_search_result("tt77", "Signal"),
        );
        let similar = SimilarTitles::new(store.clone(), metadata.clone(), RequestQueue::new(Duration::ZERO));
        let record = record_with_genre("tt1", "Vincenzo", "Crime");

        let found = similar.for_title(&record, false).await;
        let ids: Vec<&str> = found.iter().map(|r| r.external_id.as_str()).collect();
        assert_eq!(ids, vec!["tt50", "tt77"]);
        assert!(metadata.call_log().contains(&"search:Crime".to_string()));
        assert_eq!(store.similar_titles("tt1").len(), 2);

        let calls_before = metadata.call_log().len();
        similar.for_title(&record, false).await;
        assert_eq!(metadata.call_log().len(), calls_before);

        similar.for_title(&record, true).await;
        assert!(metadata.call_log().len() > calls_before);
    }
}
