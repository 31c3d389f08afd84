use async_trait::async_trait;
use nextwatch_models::{ChatMessage, MetadataRecord, SearchResult};
use crate::error::LlmError;

/// Title search and lookup against the metadata provider.
///
/// Every method fails soft: transport and decode problems are logged by the
/// implementation and surface as an empty list or `None`.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn search(&self, query: &str) -> Vec<SearchResult>;

    /// `year` narrows the match when the title is ambiguous
    async fn lookup_by_title(&self, title: &str, year: Option<&str>) -> Option<MetadataRecord>;

    /// Full-plot detail for a known external id
    async fn lookup_by_id(&self, external_id: &str) -> Option<MetadataRecord>;
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send `prompt` after the given history and return the model's text reply.
    ///
    /// History entries with roles other than user/model are not transmitted.
    async fn converse(&self, prompt: &str, history: &[ChatMessage]) -> Result<String, LlmError>;
}

/// Where the user's own language-model key lives
pub trait CredentialSource: Send + Sync {
    fn stored_api_key(&self) -> Option<String>;
}
