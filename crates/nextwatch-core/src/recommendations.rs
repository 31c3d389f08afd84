use crate::extraction::extract_candidates;
use crate::queue::RequestQueue;
use crate::store::Store;
use nextwatch_config::RecommendationConfig;
use nextwatch_models::{RecommendationCandidate, RecommendationRecord, WatchlistEntry, NOT_AVAILABLE};
use nextwatch_sources::{LanguageModel, LlmError, MetadataProvider};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{info, warn};

/// Highly rated entries when there are any, otherwise the whole watchlist
pub fn select_sources(watchlist: &[WatchlistEntry]) -> Vec<&WatchlistEntry> {
    let highly_rated: Vec<&WatchlistEntry> = watchlist.iter().filter(|e| e.is_highly_rated()).collect();
    if highly_rated.is_empty() {
        watchlist.iter().collect()
    } else {
        highly_rated
    }
}

pub fn build_prompt(entries: &[&WatchlistEntry], genre: &str, count: u32) -> String {
    let mut prompt = String::from("Based on these movies and TV shows I enjoy:\n\n");

    for (index, entry) in entries.iter().enumerate() {
        let _ = write!(prompt, "{}. \"{}\" ({})", index + 1, entry.title, entry.year);
        if let Some(rating) = entry.user_rating.filter(|r| *r > 0) {
            let _ = write!(prompt, " - My rating: {}/5", rating);
        }
        if let Some(plot) = entry.plot.as_deref().filter(|p| !p.is_empty() && *p != NOT_AVAILABLE) {
            let _ = write!(prompt, "\nPlot: {}\n", plot);
        }
        prompt.push('\n');
    }

    let _ = write!(
        prompt,
        "\nPlease recommend {} {} I might enjoy. Format your response as a simple numbered list with ONLY the title and year in parentheses, like this:\n\t1.\tCrash Landing on You (2019)\n\t2.\tVincenzo (2021)\n\nDo not include any additional information, descriptions, or explanations. Just provide a numbered list with the title and year for each recommendation.",
        count, genre
    );
    prompt
}

/// Watchlist → prompt → model → extraction → metadata resolution → cache
pub struct RecommendationPipeline {
    store: Arc<Store>,
    metadata: Arc<dyn MetadataProvider>,
    model: Arc<dyn LanguageModel>,
    genre: String,
    count: u32,
    queue: RequestQueue,
}

impl RecommendationPipeline {
    pub fn new(
        store: Arc<Store>,
        metadata: Arc<dyn MetadataProvider>,
        model: Arc<dyn LanguageModel>,
        config: &RecommendationConfig,
    ) -> Self {
        Self {
            store,
            metadata,
            model,
            genre: config.genre.clone(),
            count: config.count,
            queue: RequestQueue::new(config.request_delay()),
        }
    }

    pub fn cached(&self) -> Vec<RecommendationRecord> {
        self.store.recommendations()
    }

    /// Cached list when present; `force_refresh` discards it and regenerates
    pub async fn load_or_generate(&self, force_refresh: bool) -> Result<Vec<RecommendationRecord>, LlmError> {
        if force_refresh {
            self.store.clear_recommendations();
        } else {
            let cached = self.cached();
            if !cached.is_empty() {
                info!(count = cached.len(), "Using cached recommendations");
                return Ok(cached);
            }
        }
        self.generate().await
    }

    pub async fn generate(&self) -> Result<Vec<RecommendationRecord>, LlmError> {
        let watchlist = self.store.watchlist();
        if watchlist.is_empty() {
            info!("Watchlist is empty, nothing to base recommendations on");
            return Ok(Vec::new());
        }

        let sources = select_sources(&watchlist);
        info!(sources = sources.len(), watchlist = watchlist.len(), "Generating recommendations");

        let prompt = build_prompt(&sources, &self.genre, self.count);
        let response = self.model.converse(&prompt, &[]).await?;

        let candidates = extract_candidates(&response);
        info!(candidates = candidates.len(), "Extracted recommendation candidates");

        let records = self.resolve(candidates).await;
        self.store.save_recommendations(&records);
        Ok(records)
    }

    /// Look every candidate up in order; misses become degraded records
    pub async fn resolve(&self, candidates: Vec<RecommendationCandidate>) -> Vec<RecommendationRecord> {
        self.queue
            .run(candidates, |candidate| {
                let metadata = Arc::clone(&self.metadata);
                async move {
                    match metadata.lookup_by_title(&candidate.title, Some(candidate.year.as_str())).await {
                        Some(record) => RecommendationRecord::resolved(record),
                        None => {
                            warn!(title = %candidate.title, year = %candidate.year, "Could not resolve recommendation");
                            RecommendationRecord::degraded(candidate)
                        }
                    }
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_entry, sample_record, FakeMetadata, FakeModel};

    fn config() -> RecommendationConfig {
        RecommendationConfig {
            request_delay_ms: 0,
            ..RecommendationConfig::default()
        }
    }

    fn build_pipeline(store: Arc<Store>, metadata: Arc<FakeMetadata>, model: Arc<FakeModel>) -> RecommendationPipeline {
        RecommendationPipeline::new(store, metadata, model, &config())
    }

    #[test]
    fn test_select_sources_prefers_highly_rated() {
        let watchlist = vec![
            sample_entry("tt1", "Vincenzo", Some(5)),
            sample_entry("tt2", "Doona", Some(2)),
            sample_entry("tt3", "The Glory", Some(4)),
        ];
        let titles: Vec<&str> = select_sources(&watchlist).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Vincenzo", "The Glory"]);
    }

    #[test]
    fn test_select_sources_falls_back_to_everything() {
        let watchlist = vec![sample_entry("tt1", "Vincenzo", None), sample_entry("tt2", "Doona", Some(3))];
        assert_eq!(select_sources(&watchlist).len(), 2);
        assert!(select_sources(&[]).is_empty());
    }

    #[test]
    fn test_build_prompt() {
        let mut rated = sample_entry("tt1", "Vincenzo", Some(5));
        rated.year = "2021".to_string();
        rated.plot = Some("A consigliere returns to Korea.".to_string());
        let mut unrated = sample_entry("tt2", "Doona", Some(0));
        unrated.year = "2023".to_string();
        unrated.plot = Some(NOT_AVAILABLE.to_string());

        let prompt = build_prompt(&[&rated, &unrated], "Korean drama TV series", 10);

        assert!(prompt.starts_with("Based on these movies and TV shows I enjoy:\n\n"));
        assert!(prompt.contains("1. \"Vincenzo\" (2021) - My rating: 5/5\nPlot: A consigliere returns to Korea.\n\n"));
        assert!(prompt.contains("2. \"Doona\" (2023)\n"));
        assert!(!prompt.contains("My rating: 0/5"));
        assert!(!prompt.contains("Plot: N/A"));
        assert!(prompt.contains("Please recommend 10 Korean drama TV series I might enjoy."));
        assert!(prompt.ends_with("title and year for each recommendation."));
    }

    #[tokio::test]
    async fn test_empty_watchlist_makes_no_calls() {
        let store = Arc::new(Store::in_memory());
        let metadata = Arc::new(FakeMetadata::new());
        let model = Arc::new(FakeModel::replying("1. Vincenzo (2021)"));
        let pipeline = build_pipeline(store, metadata.clone(), model.clone());

        let records = pipeline.generate().await.unwrap();
        assert!(records.is_empty());
        assert_eq!(model.call_count(), 0);
        assert!(metadata.call_log().is_empty());
    }

    #[tokio::test]
    async fn test_generate_resolves_in_order_and_degrades_misses() {
        let store = Arc::new(Store::in_memory());
        store.add_to_watchlist(sample_entry("tt1", "Business Proposal", Some(5)));

        let metadata = Arc::new(FakeMetadata::new().with_title(sample_record("tt9", "Vincenzo")));
        let model = Arc::new(FakeModel::replying("1. Crash Landing on You (2019)\n2. Vincenzo (2021)"));
        let pipeline = build_pipeline(store.clone(), metadata.clone(), model.clone());

        let records = pipeline.generate().await.unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].is_degraded());
        assert_eq!(records[0].title, "Crash Landing on You");
        assert_eq!(records[0].year, "2019");
        assert_eq!(records[1].external_id.as_deref(), Some("tt9"));
        assert_eq!(
            metadata.call_log(),
            vec!["title:Crash Landing on You".to_string(), "title:Vincenzo".to_string()]
        );

        let (prompt, history) = model.last_call().unwrap();
        assert!(prompt.contains("\"Business Proposal\""));
        assert!(history.is_empty());
        assert_eq!(store.recommendations(), records);
    }

    #[tokio::test]
    async fn test_model_failure_propagates_and_keeps_cache() {
        let store = Arc::new(Store::in_memory());
        store.add_to_watchlist(sample_entry("tt1", "Vincenzo", None));
        let previous = vec![RecommendationRecord::degraded(RecommendationCandidate::new("Doona", "2023"))];
        store.save_recommendations(&previous);

        let model = Arc::new(FakeModel::failing(LlmError::Upstream("quota".to_string())));
        let pipeline = build_pipeline(store.clone(), Arc::new(FakeMetadata::new()), model);

        let result = pipeline.generate().await;
        assert!(matches!(result, Err(LlmError::Upstream(_))));
        assert_eq!(store.recommendations(), previous);
    }

    #[tokio::test]
    async fn test_load_or_generate_uses_cache_unless_refreshing() {
        let store = Arc::new(Store::in_memory());
        store.add_to_watchlist(sample_entry("tt1", "Vincenzo", None));
        let cached = vec![RecommendationRecord::degraded(RecommendationCandidate::new("Doona", "2023"))];
        store.save_recommendations(&cached);

        let model = Arc::new(FakeModel::replying("1. The Heirs (2013)"));
        let pipeline = build_pipeline(store.clone(), Arc::new(FakeMetadata::new()), model.clone());

        assert_eq!(pipeline.load_or_generate(false).await.unwrap(), cached);
        assert_eq!(model.call_count(), 0);

        let refreshed = pipeline.load_or_generate(true).await.unwrap();
        assert_eq!(model.call_count(), 1);
        assert_eq!(refreshed[0].title, "The Heirs");
        assert_eq!(store.recommendations(), refreshed);
    }
}
