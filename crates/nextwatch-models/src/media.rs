use serde::{Deserialize, Serialize};

/// Placeholder the metadata provider uses for missing fields.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Series,
    Episode,
    Game,
    #[serde(other)]
    Other,
}

impl MediaType {
    /// Map the provider's `Type` field (case-insensitive) to a media type
    pub fn from_provider(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "movie" => MediaType::Movie,
            "series" => MediaType::Series,
            "episode" => MediaType::Episode,
            "game" => MediaType::Game,
            _ => MediaType::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
            MediaType::Game => "game",
            MediaType::Other => "other",
        }
    }
}

/// One hit from a title search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub external_id: String,
    pub title: String,
    pub year: String,
    pub media_type: MediaType,
    pub poster: Option<String>,
}

/// Full detail for a title as returned by the metadata provider.
///
/// `year` stays a string because series report ranges such as `2019–2020`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetadataRecord {
    pub external_id: String,
    pub title: String,
    pub year: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub external_rating: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
}

impl MetadataRecord {
    /// Poster URL, or `None` when the provider had no artwork
    pub fn poster_url(&self) -> Option<&str> {
        self.poster.as_deref().filter(|p| *p != NOT_AVAILABLE && !p.is_empty())
    }

    /// Comma separated genre list, in provider order
    pub fn genres(&self) -> Vec<&str> {
        self.genre
            .as_deref()
            .map(|g| {
                g.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty() && *s != NOT_AVAILABLE)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_provider() {
        assert_eq!(MediaType::from_provider("series"), MediaType::Series);
        assert_eq!(MediaType::from_provider("Movie"), MediaType::Movie);
        assert_eq!(MediaType::from_provider("podcast"), MediaType::Other);
    }

    #[test]
    fn test_media_type_unknown_deserializes_as_other() {
        let parsed: MediaType = serde_json::from_str("\"podcast\"").unwrap();
        assert_eq!(parsed, MediaType::Other);
    }

    #[test]
    fn test_genres_split_and_poster_placeholder() {
        let record = MetadataRecord {
            external_id: "tt10850932".to_string(),
            title: "Crash Landing on You".to_string(),
            year: "2019–2020".to_string(),
            poster: Some(NOT_AVAILABLE.to_string()),
            plot: None,
            genre: Some("Comedy, Drama, Romance".to_string()),
            director: None,
            cast: None,
            external_rating: None,
            runtime: None,
            media_type: MediaType::Series,
        };
        assert_eq!(record.genres(), vec!["Comedy", "Drama", "Romance"]);
        assert_eq!(record.poster_url(), None);
    }
}
