pub mod config;
pub mod paths;

pub use config::{Config, GeminiConfig, LoggingConfig, OmdbConfig, RecommendationConfig};
pub use paths::{PathManager, base_path_override};
