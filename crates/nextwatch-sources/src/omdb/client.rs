use crate::omdb::api::{self, DetailQuery};
use crate::traits::MetadataProvider;
use async_trait::async_trait;
use nextwatch_config::OmdbConfig;
use nextwatch_models::{MetadataRecord, SearchResult};
use reqwest::Client;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &OmdbConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    async fn search(&self, query: &str) -> Vec<SearchResult> {
        match api::search(&self.client, &self.base_url, &self.api_key, query).await {
            Ok(results) => results,
            Err(e) => {
                error!(query = %query, error = %e, "Metadata search error");
                Vec::new()
            }
        }
    }

    async fn lookup_by_title(&self, title: &str, year: Option<&str>) -> Option<MetadataRecord> {
        info!(title = %title, year = ?year, "Fetching metadata details by title");
        let query = DetailQuery::Title { title, year };
        match api::get_details(&self.client, &self.base_url, &self.api_key, query).await {
            Ok(record) => Some(record),
            Err(e) => {
                error!(title = %title, error = %e, "Metadata title lookup error");
                None
            }
        }
    }

    async fn lookup_by_id(&self, external_id: &str) -> Option<MetadataRecord> {
        let query = DetailQuery::Id(external_id);
        match api::get_details(&self.client, &self.base_url, &self.api_key, query).await {
            Ok(record) => Some(record),
            Err(e) => {
                error!(external_id = %external_id, error = %e, "Metadata details error");
                None
            }
        }
    }
}
