use crate::catalog::{BUCKETS, TRENDING};
use crate::queue::RequestQueue;
use crate::store::Store;
use nextwatch_models::{HomeContent, HomeSection, MetadataRecord};
use nextwatch_sources::MetadataProvider;
use std::sync::Arc;
use tracing::info;

/// Trending titles plus one shelf per curated bucket
pub struct HomeFeed {
    store: Arc<Store>,
    metadata: Arc<dyn MetadataProvider>,
    queue: RequestQueue,
}

impl HomeFeed {
    pub fn new(store: Arc<Store>, metadata: Arc<dyn MetadataProvider>, queue: RequestQueue) -> Self {
        Self { store, metadata, queue }
    }

    pub async fn load(&self, refresh: bool) -> HomeContent {
        if refresh {
            self.store.clear_home_content();
        } else {
            let cached = self.store.home_content();
            if !cached.is_empty() {
                return cached;
            }
        }
        self.fetch().await
    }

    /// Look up every curated title; titles the provider does not know are skipped
    pub async fn fetch(&self) -> HomeContent {
        let trending = self.lookup_all(TRENDING).await;

        let mut sections = Vec::with_capacity(BUCKETS.len());
        for bucket in BUCKETS {
            let items = self.lookup_all(bucket.titles).await;
            sections.push(HomeSection {
                name: bucket.name.to_string(),
                items,
            });
        }

        let content = HomeContent { trending, sections };
        info!(
            trending = content.trending.len(),
            sections = content.sections.len(),
            "Home content loaded"
        );
        if !content.is_empty() {
            self.store.save_home_content(&content);
        }
        content
    }

    async fn lookup_all(&self, titles: &[&'static str]) -> Vec<MetadataRecord> {
        self.queue
            .run(titles.iter().copied(), |title| {
                let metadata = Arc::clone(&self.metadata);
                async move { metadata.lookup_by_title(title, None).await }
            })
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}
