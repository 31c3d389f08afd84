use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Fallback key used when the user has not stored one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_api_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecommendationConfig {
    /// What to ask the model for, e.g. "Korean drama TV series"
    #[serde(default = "default_genre")]
    pub genre: String,
    #[serde(default = "default_count")]
    pub count: u32,
    /// Pause between metadata lookups in sequential loops
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_omdb_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_max_output_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

fn default_genre() -> String {
    "Korean drama TV series".to_string()
}

fn default_count() -> u32 {
    10
}

fn default_request_delay_ms() -> u64 {
    100
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_omdb_base_url(),
            api_key: String::new(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            default_api_key: None,
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            genre: default_genre(),
            count: default_count(),
            request_delay_ms: default_request_delay_ms(),
        }
    }
}

impl RecommendationConfig {
    pub fn request_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_delay_ms)
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.is_omdb_configured() {
            return Err(anyhow::anyhow!("omdb.api_key is not configured"));
        }
        if self.omdb.base_url.is_empty() {
            return Err(anyhow::anyhow!("omdb.base_url cannot be empty"));
        }
        if self.gemini.base_url.is_empty() || self.gemini.model.is_empty() {
            return Err(anyhow::anyhow!("gemini.base_url and gemini.model are required"));
        }
        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(anyhow::anyhow!("gemini.temperature must be between 0.0 and 2.0"));
        }
        if self.gemini.max_output_tokens == 0 {
            return Err(anyhow::anyhow!("gemini.max_output_tokens must be positive"));
        }
        if self.recommendations.count == 0 {
            return Err(anyhow::anyhow!("recommendations.count must be positive"));
        }
        if self.recommendations.genre.trim().is_empty() {
            return Err(anyhow::anyhow!("recommendations.genre cannot be empty"));
        }
        Ok(())
    }

    pub fn is_omdb_configured(&self) -> bool {
        !self.omdb.api_key.is_empty() && self.omdb.api_key != "YOUR_API_KEY"
    }
}
