use thiserror::Error;

/// Failures of a language-model call. These are always propagated to the caller.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("No API key provided. Add a Gemini API key with `nextwatch config gemini`.")]
    MissingCredential,

    /// The provider answered with an error payload or without any usable text
    #[error("Language model error: {0}")]
    Upstream(String),

    #[error("Language model request failed: {0}")]
    Transport(String),
}

impl LlmError {
    /// Whether the failure points at the API key rather than the request
    pub fn is_credential_problem(&self) -> bool {
        match self {
            LlmError::MissingCredential => true,
            LlmError::Upstream(message) => {
                let lower = message.to_lowercase();
                lower.contains("api key") || lower.contains("api_key")
            }
            LlmError::Transport(_) => false,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Transport(err.to_string())
    }
}
