//! The text-generation seam: one request in, optional text out.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("no API key configured for the text-generation service")]
    MissingApiKey,

    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[cfg(feature = "http")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable generation parameters. Temperature is the only one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { temperature: 0.7 }
    }
}

/// A single generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub system_instruction: String,
    pub contents: String,
    pub config: GenerationConfig,
}

/// Backend that turns a [`GenerateRequest`] into text.
///
/// `Ok(None)` means the service answered but produced no text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, GenerateError>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<T> {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, GenerateError> {
        (**self).generate(request).await
    }
}
