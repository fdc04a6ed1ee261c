//! The polishing gateway.
//!
//! Polishing is cosmetic: whatever goes wrong, the caller gets its own text
//! back and the failure only shows up in the log.

use laporan_core::NarrativeField;
use tracing::{info, warn};

use crate::generator::{GenerateRequest, GenerationConfig, TextGenerator};
use crate::prompt::{MODEL, build_system_instruction, build_user_prompt};

pub struct Polisher<G> {
    generator: G,
    config: GenerationConfig,
}

impl<G: TextGenerator> Polisher<G> {
    pub fn new(generator: G) -> Self {
        Self::with_config(generator, GenerationConfig::default())
    }

    pub fn with_config(generator: G, config: GenerationConfig) -> Self {
        Self { generator, config }
    }

    /// The request that would be sent for `text` in `field`.
    pub fn request_for(&self, text: &str, field: NarrativeField) -> GenerateRequest {
        GenerateRequest {
            model: MODEL.to_string(),
            system_instruction: build_system_instruction(field),
            contents: build_user_prompt(text),
            config: self.config,
        }
    }

    /// Rewrite `text` into formal register, or return it unchanged.
    ///
    /// Blank input short-circuits without calling the service.
    pub async fn polish(&self, text: &str, field: NarrativeField) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let request = self.request_for(text, field);
        match self.generator.generate(&request).await {
            Ok(Some(polished)) if !polished.is_empty() => {
                info!(
                    field = %field,
                    input_chars = text.chars().count(),
                    output_chars = polished.chars().count(),
                    "narrative polished"
                );
                polished
            }
            Ok(_) => {
                warn!(field = %field, "generation returned no text, keeping original");
                text.to_string()
            }
            Err(e) => {
                warn!(field = %field, error = %e, "generation failed, keeping original");
                text.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenerateError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted backend that records every request.
    struct Scripted {
        reply: fn(&GenerateRequest) -> Result<Option<String>, GenerateError>,
        calls: AtomicUsize,
        last: Mutex<Option<GenerateRequest>>,
    }

    impl Scripted {
        fn new(reply: fn(&GenerateRequest) -> Result<Option<String>, GenerateError>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(
            &self,
            request: &GenerateRequest,
        ) -> Result<Option<String>, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            (self.reply)(request)
        }
    }

    #[tokio::test]
    async fn blank_input_makes_no_call() {
        let polisher = Polisher::new(Scripted::new(|_| Ok(Some("x".into()))));
        for field in NarrativeField::ALL {
            assert_eq!(polisher.polish("", field).await, "");
            assert_eq!(polisher.polish("   ", field).await, "   ");
            assert_eq!(polisher.polish("\n\t", field).await, "\n\t");
        }
        assert_eq!(polisher.generator.calls(), 0);
    }

    #[tokio::test]
    async fn success_returns_reply_verbatim() {
        let polisher = Polisher::new(Scripted::new(|_| {
            Ok(Some("1. Murid telah terjatuh.\n2. Guru dimaklumkan.".into()))
        }));
        let out = polisher
            .polish("1. murid jatuh\n2. cikgu tau", NarrativeField::Chronology)
            .await;
        assert_eq!(out, "1. Murid telah terjatuh.\n2. Guru dimaklumkan.");
        assert_eq!(polisher.generator.calls(), 1);
    }

    #[tokio::test]
    async fn failure_returns_original() {
        let polisher = Polisher::new(Scripted::new(|_| {
            Err(GenerateError::Server {
                status: 503,
                body: "overloaded".into(),
            })
        }));
        let text = "tindakan diambil";
        assert_eq!(polisher.polish(text, NarrativeField::Actions).await, text);
        assert_eq!(polisher.generator.calls(), 1);
    }

    #[tokio::test]
    async fn missing_or_empty_text_returns_original() {
        let none = Polisher::new(Scripted::new(|_| Ok(None)));
        assert_eq!(none.polish("asal", NarrativeField::Actions).await, "asal");

        let empty = Polisher::new(Scripted::new(|_| Ok(Some(String::new()))));
        assert_eq!(empty.polish("asal", NarrativeField::Actions).await, "asal");
    }

    #[tokio::test]
    async fn request_shape() {
        let polisher = Polisher::new(Scripted::new(|_| Ok(Some("ok".into()))));
        polisher.polish("teks", NarrativeField::Actions).await;

        let req = polisher.generator.last.lock().unwrap().clone().unwrap();
        assert_eq!(req.model, MODEL);
        assert_eq!(req.config.temperature, 0.7);
        assert!(req.system_instruction.contains("Tindakan Sekolah"));
        assert!(req.contents.ends_with("\n\nteks"));
    }

    #[tokio::test]
    async fn temperature_is_configurable() {
        let polisher = Polisher::with_config(
            Scripted::new(|req| Ok(Some(format!("t={}", req.config.temperature)))),
            GenerationConfig { temperature: 0.2 },
        );
        assert_eq!(
            polisher.polish("x", NarrativeField::Chronology).await,
            "t=0.2"
        );
    }
}
