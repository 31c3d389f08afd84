pub mod error;
pub mod gemini;
pub mod omdb;
pub mod traits;

pub use error::LlmError;
pub use gemini::{GeminiClient, resolve_api_key};
pub use omdb::OmdbClient;
pub use traits::{CredentialSource, LanguageModel, MetadataProvider};
