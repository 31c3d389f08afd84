use crate::commands::prompts::{self, Confirm};
use crate::commands::render::Theme;
use crate::output::Output;
use color_eyre::Result;
use nextwatch_config::{Config, PathManager};
use nextwatch_core::{
    ChatSession, HomeFeed, RecommendationPipeline, RequestQueue, SimilarTitles, Store, WatchlistService,
};
use nextwatch_sources::{GeminiClient, MetadataProvider, OmdbClient};
use std::sync::Arc;

/// Services shared by every command, built once per invocation
pub struct App {
    pub paths: PathManager,
    pub config: Config,
    pub output: Output,
    pub confirm: Box<dyn Confirm>,
    pub store: Arc<Store>,
    pub metadata: Arc<dyn MetadataProvider>,
    pub gemini: Arc<GeminiClient>,
    pub watchlist: WatchlistService,
    pub recommendations: RecommendationPipeline,
    pub chat: ChatSession,
    pub similar: SimilarTitles,
    pub home: HomeFeed,
}

impl App {
    pub fn new(paths: PathManager, config: Config, output: Output, assume_yes: bool) -> Result<Self> {
        paths
            .ensure_directories()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create data directories: {}", e))?;

        let store = Arc::new(Store::open(paths.store_dir()));
        let metadata: Arc<dyn MetadataProvider> = Arc::new(OmdbClient::new(&config.omdb));
        let gemini = Arc::new(GeminiClient::new(&config.gemini, store.clone()));
        let queue = RequestQueue::new(config.recommendations.request_delay());

        let watchlist = WatchlistService::new(store.clone(), metadata.clone());
        let recommendations = RecommendationPipeline::new(
            store.clone(),
            metadata.clone(),
            gemini.clone(),
            &config.recommendations,
        );
        let chat = ChatSession::new(store.clone(), gemini.clone());
        let similar = SimilarTitles::new(store.clone(), metadata.clone(), queue);
        let home = HomeFeed::new(store.clone(), metadata.clone(), queue);

        Ok(Self {
            paths,
            config,
            output,
            confirm: prompts::confirmer(assume_yes),
            store,
            metadata,
            gemini,
            watchlist,
            recommendations,
            chat,
            similar,
            home,
        })
    }

    pub fn theme(&self) -> Theme {
        Theme::new(self.store.dark_mode())
    }

    /// Commands that talk to the metadata provider need its key first
    pub fn require_metadata(&self) -> Result<()> {
        if self.config.is_omdb_configured() {
            Ok(())
        } else {
            Err(color_eyre::eyre::eyre!(
                "OMDb API key is not configured. Run `nextwatch config omdb --api-key <KEY>` first."
            ))
        }
    }

    /// Details for a title, preferring the watchlist copy over a network lookup
    pub async fn find_title(&self, external_id: &str) -> Result<nextwatch_models::MetadataRecord> {
        if let Some(entry) = self.store.find_in_watchlist(external_id) {
            return Ok(entry.to_metadata());
        }
        self.require_metadata()?;
        self.metadata
            .lookup_by_id(external_id)
            .await
            .ok_or_else(|| color_eyre::eyre::eyre!("No title found with id {}", external_id))
    }
}
