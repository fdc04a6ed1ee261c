//! HTTP client for the Gemini `generateContent` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generator::{GenerateError, GenerateRequest, TextGenerator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Text generator backed by the hosted Gemini API.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

// ── Wire types ──

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    system_instruction: WireContent<'a>,
    contents: Vec<WireContent<'a>>,
    generation_config: WireGenerationConfig,
}

#[derive(Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct WireGenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Deserialize)]
struct WireCandidate {
    content: Option<WireCandidateContent>,
}

#[derive(Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Deserialize)]
struct WireResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

fn to_wire(request: &GenerateRequest) -> WireRequest<'_> {
    WireRequest {
        system_instruction: WireContent {
            role: None,
            parts: vec![WirePart {
                text: &request.system_instruction,
            }],
        },
        contents: vec![WireContent {
            role: Some("user"),
            parts: vec![WirePart {
                text: &request.contents,
            }],
        }],
        generation_config: WireGenerationConfig {
            temperature: request.config.temperature,
        },
    }
}

/// Concatenated text parts of the first candidate, skipping thought parts.
fn extract_text(response: WireResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content
        .parts
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();
    if text.is_empty() { None } else { Some(text) }
}

impl GeminiClient {
    /// Create a client for the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GenerateError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerateError::MissingApiKey);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Point the client at another host, e.g. `http://localhost:8080`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, GenerateError> {
        let url = self.endpoint(&request.model);

        info!(model = %request.model, "requesting text generation");
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&to_wire(request))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerateError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let parsed: WireResponse = serde_json::from_str(&body)?;
        Ok(extract_text(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenerationConfig;

    fn request() -> GenerateRequest {
        GenerateRequest {
            model: "gemini-3-flash-preview".into(),
            system_instruction: "Anda adalah Pegawai Tadbir.".into(),
            contents: "Sila murnikan teks berikut:\n\nteks".into(),
            config: GenerationConfig::default(),
        }
    }

    #[test]
    fn request_json_shape() {
        let req = request();
        let v = serde_json::to_value(to_wire(&req)).unwrap();
        assert_eq!(
            v["systemInstruction"]["parts"][0]["text"],
            "Anda adalah Pegawai Tadbir."
        );
        assert!(v["systemInstruction"].get("role").is_none());
        assert_eq!(v["contents"][0]["role"], "user");
        assert_eq!(
            v["contents"][0]["parts"][0]["text"],
            "Sila murnikan teks berikut:\n\nteks"
        );
        let t = v["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((t - 0.7).abs() < 1e-6);
        assert_eq!(v["generationConfig"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn extracts_joined_parts_of_first_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "1. Murid telah "},
                    {"text": "terjatuh."}
                ]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let parsed: WireResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_text(parsed).as_deref(), Some("1. Murid telah terjatuh."));
    }

    #[test]
    fn no_candidates_means_no_text() {
        let parsed: WireResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(extract_text(parsed).is_none());

        let parsed: WireResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(extract_text(parsed).is_none());
    }

    #[test]
    fn empty_key_rejected() {
        assert!(matches!(
            GeminiClient::new("  "),
            Err(GenerateError::MissingApiKey)
        ));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = GeminiClient::new("k")
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(
            client.endpoint("gemini-3-flash-preview"),
            "http://localhost:8080/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }
}
