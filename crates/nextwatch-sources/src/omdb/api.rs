use anyhow::{anyhow, Result};
use nextwatch_models::{MediaType, MetadataRecord, SearchResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Type", default)]
    item_type: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbDetailResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Type")]
    item_type: Option<String>,
}

/// How a detail request identifies the title
#[derive(Debug, Clone, Copy)]
pub enum DetailQuery<'a> {
    Title { title: &'a str, year: Option<&'a str> },
    Id(&'a str),
}

impl DetailQuery<'_> {
    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            DetailQuery::Title { title, year } => {
                let mut params = vec![("t", title.to_string())];
                if let Some(year) = year.filter(|y| !y.is_empty()) {
                    params.push(("y", year.to_string()));
                }
                params
            }
            DetailQuery::Id(id) => vec![("i", id.to_string()), ("plot", "full".to_string())],
        }
    }
}

/// Parse a search (`s=`) response body
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>> {
    let parsed: OmdbSearchResponse = serde_json::from_str(body)?;
    if parsed.response != "True" {
        return Err(anyhow!(
            "search failed: {}",
            parsed.error.unwrap_or_else(|| "unknown error".to_string())
        ));
    }

    Ok(parsed
        .search
        .into_iter()
        .map(|item| SearchResult {
            external_id: item.imdb_id,
            title: item.title,
            year: item.year,
            media_type: MediaType::from_provider(&item.item_type),
            poster: item.poster,
        })
        .collect())
}

/// Parse a detail (`t=` or `i=`) response body
pub fn parse_detail_response(body: &str) -> Result<MetadataRecord> {
    let parsed: OmdbDetailResponse = serde_json::from_str(body)?;
    if parsed.response != "True" {
        return Err(anyhow!(
            "lookup failed: {}",
            parsed.error.unwrap_or_else(|| "unknown error".to_string())
        ));
    }

    let external_id = parsed.imdb_id.ok_or_else(|| anyhow!("Missing imdbID in detail response"))?;
    let title = parsed.title.ok_or_else(|| anyhow!("Missing Title in detail response"))?;

    Ok(MetadataRecord {
        external_id,
        title,
        year: parsed.year.unwrap_or_default(),
        poster: parsed.poster,
        plot: parsed.plot,
        genre: parsed.genre,
        director: parsed.director,
        cast: parsed.actors,
        external_rating: parsed.imdb_rating,
        runtime: parsed.runtime,
        media_type: parsed
            .item_type
            .as_deref()
            .map(MediaType::from_provider)
            .unwrap_or_default(),
    })
}

async fn get_body(client: &Client, base_url: &str, api_key: &str, params: &[(&str, String)]) -> Result<String> {
    let response = client
        .get(base_url)
        .query(&[("apikey", api_key)])
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("Metadata request failed: {} - {}", status, error_text));
    }

    Ok(response.text().await?)
}

pub async fn search(client: &Client, base_url: &str, api_key: &str, query: &str) -> Result<Vec<SearchResult>> {
    debug!(query = %query, "Searching metadata provider");
    let body = get_body(client, base_url, api_key, &[("s", query.to_string())]).await?;
    parse_search_response(&body)
}

pub async fn get_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: DetailQuery<'_>,
) -> Result<MetadataRecord> {
    debug!(query = ?query, "Fetching metadata details");
    let body = get_body(client, base_url, api_key, &query.params()).await?;
    parse_detail_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: &str = r#"{
        "Title": "Vincenzo",
        "Year": "2021",
        "Runtime": "80 min",
        "Genre": "Action, Comedy, Crime",
        "Director": "N/A",
        "Actors": "Song Joong-ki, Jeon Yeo-been, Ok Taec-yeon",
        "Plot": "A Korean-Italian mafia lawyer outwits an iniquitous business conglomerate.",
        "Poster": "https://m.media-amazon.com/images/vincenzo.jpg",
        "imdbRating": "8.4",
        "imdbID": "tt13433812",
        "Type": "series",
        "Response": "True"
    }"#;

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "Search": [
                {"Title": "The Glory", "Year": "2022–2023", "imdbID": "tt21344706", "Type": "series", "Poster": "N/A"},
                {"Title": "Glory", "Year": "1989", "imdbID": "tt0097441", "Type": "movie", "Poster": "https://example.com/g.jpg"}
            ],
            "totalResults": "2",
            "Response": "True"
        }"#;

        let results = parse_search_response(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].external_id, "tt21344706");
        assert_eq!(results[0].year, "2022–2023");
        assert_eq!(results[0].media_type, MediaType::Series);
        assert_eq!(results[1].media_type, MediaType::Movie);
    }

    #[test]
    fn test_parse_search_not_found() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let err = parse_search_response(body).unwrap_err();
        assert!(err.to_string().contains("Movie not found!"));
    }

    #[test]
    fn test_parse_detail_response() {
        let record = parse_detail_response(DETAIL).unwrap();
        assert_eq!(record.external_id, "tt13433812");
        assert_eq!(record.title, "Vincenzo");
        assert_eq!(record.cast.as_deref(), Some("Song Joong-ki, Jeon Yeo-been, Ok Taec-yeon"));
        assert_eq!(record.external_rating.as_deref(), Some("8.4"));
        assert_eq!(record.director.as_deref(), Some("N/A"));
        assert_eq!(record.media_type, MediaType::Series);
    }

    #[test]
    fn test_parse_detail_error_and_garbage() {
        assert!(parse_detail_response(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#).is_err());
        assert!(parse_detail_response("<html>bad gateway</html>").is_err());
    }

    #[test]
    fn test_detail_query_params() {
        let by_title = DetailQuery::Title { title: "The Glory", year: Some("2022") }.params();
        assert_eq!(by_title, vec![("t", "The Glory".to_string()), ("y", "2022".to_string())]);

        let no_year = DetailQuery::Title { title: "The Glory", year: Some("") }.params();
        assert_eq!(no_year.len(), 1);

        let by_id = DetailQuery::Id("tt21344706").params();
        assert_eq!(by_id, vec![("i", "tt21344706".to_string()), ("plot", "full".to_string())]);
    }
}
