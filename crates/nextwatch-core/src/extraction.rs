//! Turns free-form model output into `Title (Year)` candidates.
//!
//! Each non-blank line is matched against an ordered list of patterns and the
//! first hit wins. Quoted forms come before their plain counterparts so the
//! quotes never end up in the title. Only when no line matches at all does a
//! greedy scan over the whole text run.

use nextwatch_models::RecommendationCandidate;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

struct LinePattern {
    name: &'static str,
    regex: Regex,
}

fn line_patterns() -> &'static [LinePattern] {
    static PATTERNS: OnceLock<Vec<LinePattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            ("numbered_quoted", r#"^[0-9]+\.?\s*["'](.+?)["']\s*\(([0-9]{4})\)$"#),
            ("numbered", r"^[0-9]+\.?\s*(.+?)\s*\(([0-9]{4})\)$"),
            ("bullet_quoted", r#"^[•*-]\s*["'](.+?)["']\s*\(([0-9]{4})\)$"#),
            ("bullet", r"^[•*-]\s*(.+?)\s*\(([0-9]{4})\)$"),
            ("with_description", r"^(?:[0-9]+\.?\s*)?(.+?)\s*\(([0-9]{4})\)\s*-.*$"),
            ("bare", r"^(.+?)\s*\(([0-9]{4})\)$"),
        ]
        .into_iter()
        .filter_map(|(name, pattern)| match Regex::new(pattern) {
            Ok(regex) => Some(LinePattern { name, regex }),
            Err(e) => {
                warn!(pattern = name, error = %e, "Invalid extraction pattern");
                None
            }
        })
        .collect()
    })
}

fn fallback_pattern() -> Option<&'static Regex> {
    static FALLBACK: OnceLock<Option<Regex>> = OnceLock::new();
    FALLBACK
        .get_or_init(|| Regex::new(r"([^(]+)\(([0-9]{4})\)").ok())
        .as_ref()
}

/// Trim and drop one surrounding pair of matching quotes
fn clean_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .map(str::trim)
        .unwrap_or(trimmed);

    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}

fn match_line(line: &str) -> Option<RecommendationCandidate> {
    line_patterns().iter().find_map(|pattern| {
        let caps = pattern.regex.captures(line)?;
        let title = clean_title(caps.get(1)?.as_str())?;
        let year = caps.get(2)?.as_str();
        debug!(pattern = pattern.name, title = %title, year = %year, "Matched recommendation line");
        Some(RecommendationCandidate::new(title, year))
    })
}

fn fallback_scan(text: &str) -> Vec<RecommendationCandidate> {
    let Some(regex) = fallback_pattern() else {
        return Vec::new();
    };

    regex
        .captures_iter(text)
        .filter_map(|caps| {
            let title = clean_title(caps.get(1)?.as_str())?;
            Some(RecommendationCandidate::new(title, caps.get(2)?.as_str()))
        })
        .collect()
}

/// Extract title/year candidates in the order they appear in `text`
pub fn extract_candidates(text: &str) -> Vec<RecommendationCandidate> {
    let candidates: Vec<RecommendationCandidate> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(match_line)
        .collect();

    if !candidates.is_empty() {
        return candidates;
    }

    let recovered = fallback_scan(text);
    if recovered.is_empty() {
        warn!(chars = text.len(), "No recommendations found in model output");
    } else {
        debug!(count = recovered.len(), "Recovered recommendations with fallback scan");
    }
    recovered
}

#[cfg(test)]
mod tests;
