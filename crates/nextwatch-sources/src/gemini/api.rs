use crate::error::LlmError;
use nextwatch_models::{ChatMessage, ChatRole};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn turn(role: &str, text: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part { text: Some(text.to_string()) }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    error: Option<ApiError>,
    candidates: Option<Vec<Candidate>>,
}

/// Build the ordered `contents` array: filtered history, then the prompt as the last user turn
pub fn build_contents(prompt: &str, history: &[ChatMessage]) -> Vec<Content> {
    let mut contents: Vec<Content> = history
        .iter()
        .filter(|msg| msg.is_conversational())
        .map(|msg| {
            let role = match msg.role {
                ChatRole::Model => "model",
                _ => "user",
            };
            Content::turn(role, &msg.content)
        })
        .collect();

    contents.push(Content::turn("user", prompt));
    contents
}

pub fn build_request(prompt: &str, history: &[ChatMessage], max_output_tokens: u32, temperature: f32) -> GenerateRequest {
    GenerateRequest {
        contents: build_contents(prompt, history),
        generation_config: GenerationConfig {
            max_output_tokens,
            temperature: Some(temperature),
        },
    }
}

/// Extract `candidates[0].content.parts[0].text`, or the provider's error message
pub fn parse_generate_response(body: &str) -> Result<String, LlmError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::Transport(format!("Invalid response body: {}", e)))?;

    if let Some(err) = parsed.error {
        error!(status = ?err.status, message = ?err.message, "Language model API error");
        return Err(LlmError::Upstream(
            err.message.unwrap_or_else(|| "Error calling language model API".to_string()),
        ));
    }

    parsed
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| LlmError::Upstream("Unexpected response format from language model API".to_string()))
}

pub fn generate_url(base_url: &str, model: &str) -> String {
    format!("{}{}:generateContent", base_url, model)
}

pub async fn generate_content(
    client: &Client,
    url: &str,
    api_key: &str,
    request: &GenerateRequest,
) -> Result<String, LlmError> {
    debug!(turns = request.contents.len(), "Sending generateContent request");

    let response = client
        .post(url)
        .query(&[("key", api_key)])
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await?;

    // Error payloads arrive with non-2xx statuses; parse the body either way
    let body = response.text().await?;
    parse_generate_response(&body)
}

/// Cheap probe used to check whether a key is accepted
pub fn probe_request() -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: None,
            parts: vec![Part { text: Some("Hello".to_string()) }],
        }],
        generation_config: GenerationConfig {
            max_output_tokens: 10,
            temperature: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_contents_filters_system_and_appends_prompt() {
        let history = vec![
            ChatMessage::system("You are a film critic"),
            ChatMessage::user("Who directed it?"),
            ChatMessage::model("Kim Hee-won."),
        ];

        let contents = build_contents("Any sequels?", &history);
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role.as_deref(), Some("user"));
        assert_eq!(contents[1].role.as_deref(), Some("model"));
        assert_eq!(contents[2].role.as_deref(), Some("user"));
        assert_eq!(contents[2].parts[0].text.as_deref(), Some("Any sequels?"));
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = build_request("Hi", &[], 1024, 0.7);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hi");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
        assert!(json["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_probe_request_has_no_role_or_temperature() {
        let json = serde_json::to_value(probe_request()).unwrap();
        assert!(json["contents"][0].get("role").is_none());
        assert!(json["generationConfig"].get("temperature").is_none());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 10);
    }

    #[test]
    fn test_parse_generate_response_text() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"1. Vincenzo (2021)"}]},"finishReason":"STOP"}]}"#;
        assert_eq!(parse_generate_response(body).unwrap(), "1. Vincenzo (2021)");
    }

    #[test]
    fn test_parse_generate_response_error_payload() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        match parse_generate_response(body) {
            Err(LlmError::Upstream(message)) => assert!(message.contains("API key not valid")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_generate_response_empty() {
        assert!(matches!(parse_generate_response(r#"{"candidates":[]}"#), Err(LlmError::Upstream(_))));
        assert!(matches!(
            parse_generate_response(r#"{"candidates":[{"content":{"parts":[]}}]}"#),
            Err(LlmError::Upstream(_))
        ));
        assert!(matches!(parse_generate_response("not json"), Err(LlmError::Transport(_))));
    }

    #[test]
    fn test_generate_url() {
        assert_eq!(
            generate_url("https://generativelanguage.googleapis.com/v1beta/models/", "gemini-1.5-flash-latest"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }
}
