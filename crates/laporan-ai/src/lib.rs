//! Polishing layer: prompt construction, the text-generation seam, and the
//! fallback-on-failure gateway the editor calls.

pub mod generator;
pub mod polisher;
pub mod prompt;

#[cfg(feature = "http")]
pub mod gemini;

pub use generator::{GenerateError, GenerateRequest, GenerationConfig, TextGenerator};
pub use polisher::Polisher;

#[cfg(feature = "http")]
pub use gemini::GeminiClient;
