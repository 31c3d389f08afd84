use serde::{Deserialize, Serialize};
use crate::media::{MediaType, MetadataRecord, NOT_AVAILABLE};

/// Plot text used for recommendations that could not be resolved
pub const DEGRADED_PLOT: &str = "No details available";

/// Raw title/year pair extracted from model output, before any lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationCandidate {
    pub title: String,
    pub year: String,
}

impl RecommendationCandidate {
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRecord {
    pub title: String,
    pub year: String,
    /// `None` marks a degraded record (the metadata lookup failed)
    pub external_id: Option<String>,
    pub poster: String,
    pub plot: String,
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
    pub media_type: Option<MediaType>,
}

impl RecommendationRecord {
    pub fn resolved(record: MetadataRecord) -> Self {
        Self {
            title: record.title,
            year: record.year,
            external_id: Some(record.external_id),
            poster: record.poster.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            plot: record.plot.unwrap_or_default(),
            genre: record.genre,
            director: record.director,
            cast: record.cast,
            external_rating: record.external_rating,
            runtime: record.runtime,
            media_type: Some(record.media_type),
        }
    }

    pub fn degraded(candidate: RecommendationCandidate) -> Self {
        Self {
            title: candidate.title,
            year: candidate.year,
            external_id: None,
            poster: NOT_AVAILABLE.to_string(),
            plot: DEGRADED_PLOT.to_string(),
            genre: None,
            director: None,
            cast: None,
            external_rating: None,
            runtime: None,
            media_type: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.external_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_record_keeps_candidate_fields() {
        let record = RecommendationRecord::degraded(RecommendationCandidate::new("Vincenzo", "2021"));
        assert!(record.is_degraded());
        assert_eq!(record.title, "Vincenzo");
        assert_eq!(record.year, "2021");
        assert_eq!(record.poster, NOT_AVAILABLE);
        assert_eq!(record.plot, DEGRADED_PLOT);
    }

    #[test]
    fn test_degraded_record_serializes_null_id() {
        let record = RecommendationRecord::degraded(RecommendationCandidate::new("The Glory", "2022"));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["external_id"].is_null());
    }
}
