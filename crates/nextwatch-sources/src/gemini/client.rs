use crate::error::LlmError;
use crate::gemini::api;
use crate::traits::{CredentialSource, LanguageModel};
use async_trait::async_trait;
use nextwatch_config::GeminiConfig;
use nextwatch_models::ChatMessage;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, warn};

/// Pick the user's stored key first, then the configured default
pub fn resolve_api_key(stored: Option<String>, default: Option<&str>) -> Result<String, LlmError> {
    stored
        .filter(|key| !key.trim().is_empty())
        .or_else(|| default.filter(|key| !key.trim().is_empty()).map(str::to_string))
        .ok_or(LlmError::MissingCredential)
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Arc<Client>,
    config: GeminiConfig,
    credentials: Arc<dyn CredentialSource>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            config: config.clone(),
            credentials,
        }
    }

    fn api_key(&self) -> Result<String, LlmError> {
        resolve_api_key(self.credentials.stored_api_key(), self.config.default_api_key.as_deref())
    }

    /// Whether a key would be resolved for requests right now
    pub fn has_credential(&self) -> bool {
        self.api_key().is_ok()
    }

    /// Send a tiny probe request with `key` and report whether the provider accepted it
    pub async fn validate_key(&self, key: &str) -> bool {
        let url = api::generate_url(&self.config.base_url, &self.config.model);
        match api::generate_content(&self.client, &url, key, &api::probe_request()).await {
            Ok(_) => true,
            // A valid key can still produce an empty probe answer
            Err(LlmError::Upstream(message)) if message.starts_with("Unexpected response format") => true,
            Err(e) => {
                warn!(error = %e, "API key validation failed");
                false
            }
        }
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn converse(&self, prompt: &str, history: &[ChatMessage]) -> Result<String, LlmError> {
        let api_key = self.api_key()?;
        let request = api::build_request(
            prompt,
            history,
            self.config.max_output_tokens,
            self.config.temperature,
        );
        let url = api::generate_url(&self.config.base_url, &self.config.model);

        debug!(model = %self.config.model, history = history.len(), "Calling language model");
        api::generate_content(&self.client, &url, &api_key, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoStoredKey;

    impl CredentialSource for NoStoredKey {
        fn stored_api_key(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_resolve_api_key_precedence() {
        assert_eq!(resolve_api_key(Some("user".to_string()), Some("default")).unwrap(), "user");
        assert_eq!(resolve_api_key(None, Some("default")).unwrap(), "default");
        assert_eq!(resolve_api_key(Some("  ".to_string()), Some("default")).unwrap(), "default");
        assert!(matches!(resolve_api_key(None, None), Err(LlmError::MissingCredential)));
        assert!(matches!(resolve_api_key(None, Some("")), Err(LlmError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_converse_without_any_key_fails_before_network() {
        let client = GeminiClient::new(&GeminiConfig::default(), Arc::new(NoStoredKey));
        assert!(!client.has_credential());
        let result = client.converse("hello", &[]).await;
        assert!(matches!(result, Err(LlmError::MissingCredential)));
    }
}
