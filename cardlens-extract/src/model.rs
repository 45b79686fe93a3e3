//! External generative-model client.
//!
//! The pipeline talks to the model through the [`GenerativeModel`] trait so
//! tests can substitute doubles; [`GeminiClient`] is the production
//! implementation over the Gemini REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const RETRY_BACKOFF: Duration = Duration::from_millis(750);

#[derive(Debug, Error)]
pub enum ModelError {
    /// Transport failure, timeout, or non-2xx status from the model API.
    #[error("model request failed: {0}")]
    Service(String),

    /// The model replied but the reply was unusable.
    #[error("model reply was not usable: {0}")]
    Malformed(String),
}

/// A black-box generative capability with a JSON-schema-constrained reply.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send `prompt` and return the raw JSON text of the model's reply,
    /// constrained by `response_schema`.
    async fn generate_json(&self, prompt: &str, response_schema: Value)
        -> Result<String, ModelError>;
}

// Request/response wire types for the generateContent endpoint.

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: i32,
    top_p: f64,
    max_output_tokens: i32,
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini REST client with deterministic generation settings.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client with an explicit request timeout.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout_secs: u64)
        -> Result<Self, ModelError>
    {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ModelError::Service(format!("build http client: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn post_once(&self, body: &GenerateRequest) -> Result<String, ModelError> {
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::Service(format!("send request: {e}")))?;

        let status = resp.status();
        if status.is_server_error() {
            return Err(ModelError::Service(format!("model API returned {status}")));
        }
        if !status.is_success() {
            // 4xx: quota, bad key, blocked input. Retrying will not help.
            let detail = resp.text().await.unwrap_or_default();
            warn!(%status, "model API rejected the request: {detail}");
            return Err(ModelError::Service(format!("model API returned {status}")));
        }

        let out: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ModelError::Malformed(format!("decode response envelope: {e}")))?;
        reply_text(out)
    }
}

/// Build the generateContent body: deterministic sampling, JSON-constrained
/// reply, moderate-and-above blocking on the four harm categories.
fn request_body(prompt: &str, response_schema: Value) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.1,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: 8192,
            response_mime_type: "application/json".to_string(),
            response_schema,
        },
        safety_settings: vec![
            SafetySetting {
                category: "HARM_CATEGORY_HARASSMENT",
                threshold: "BLOCK_MEDIUM_AND_ABOVE",
            },
            SafetySetting {
                category: "HARM_CATEGORY_HATE_SPEECH",
                threshold: "BLOCK_MEDIUM_AND_ABOVE",
            },
            SafetySetting {
                category: "HARM_CATEGORY_SEXUALLY_EXPLICIT",
                threshold: "BLOCK_MEDIUM_AND_ABOVE",
            },
            SafetySetting {
                category: "HARM_CATEGORY_DANGEROUS_CONTENT",
                threshold: "BLOCK_MEDIUM_AND_ABOVE",
            },
        ],
    }
}

/// Concatenate the text parts of the first candidate.
fn reply_text(resp: GenerateResponse) -> Result<String, ModelError> {
    let mut text = String::new();
    let candidate = resp
        .candidates
        .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
        .ok_or_else(|| ModelError::Malformed("model returned no candidates".to_string()))?;

    if let Some(content) = candidate.content {
        for part in content.parts.unwrap_or_default() {
            if let Some(t) = part.text {
                text.push_str(&t);
            }
        }
    }

    if text.trim().is_empty() {
        return Err(ModelError::Malformed("model returned an empty reply".to_string()));
    }
    Ok(text.trim().to_string())
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_json(&self, prompt: &str, response_schema: Value)
        -> Result<String, ModelError>
    {
        let body = request_body(prompt, response_schema);

        // Single retry with a short backoff on transport/5xx failures.
        match self.post_once(&body).await {
            Ok(text) => Ok(text),
            Err(ModelError::Service(first)) => {
                warn!("model call failed, retrying once: {first}");
                tokio::time::sleep(RETRY_BACKOFF).await;
                self.post_once(&body).await
            }
            Err(other) => Err(other),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_is_deterministic_and_schema_constrained() {
        let body = request_body("extract this", json!({"type": "OBJECT"}));
        let wire = serde_json::to_value(&body).unwrap();

        assert_eq!(wire["generationConfig"]["temperature"], 0.1);
        assert_eq!(wire["generationConfig"]["topK"], 1);
        assert_eq!(wire["generationConfig"]["topP"], 1.0);
        assert_eq!(wire["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(wire["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(wire["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(wire["contents"][0]["role"], "user");
        assert_eq!(wire["contents"][0]["parts"][0]["text"], "extract this");
    }

    #[test]
    fn test_request_body_blocks_all_four_harm_categories() {
        let body = request_body("x", json!({}));
        let wire = serde_json::to_value(&body).unwrap();
        let settings = wire["safetySettings"].as_array().unwrap();
        assert_eq!(settings.len(), 4);
        for s in settings {
            assert_eq!(s["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
        }
        let categories: Vec<_> = settings.iter().map(|s| s["category"].clone()).collect();
        assert!(categories.contains(&json!("HARM_CATEGORY_DANGEROUS_CONTENT")));
    }

    #[test]
    fn test_reply_text_joins_candidate_parts() {
        let resp: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(reply_text(resp).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_reply_without_candidates_is_malformed() {
        let resp: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(reply_text(resp), Err(ModelError::Malformed(_))));

        let resp: GenerateResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(matches!(reply_text(resp), Err(ModelError::Malformed(_))));
    }

    #[test]
    fn test_endpoint_includes_model_name() {
        let client = GeminiClient::new("test-key", DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS).unwrap();
        assert!(client.endpoint().ends_with("models/gemini-2.5-flash:generateContent"));
    }
}
