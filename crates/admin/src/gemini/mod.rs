//! Gemini API integration for drafting product copy.
//!
//! # Features
//!
//! - Single-turn `generateContent` calls with a fixed sampling configuration
//! - [`TextGenerator`] seam so callers (and tests) never depend on HTTP
//!
//! The client reports every failure as a [`GeminiError`]; turning failures
//! into user-facing fallback text is the job of
//! [`crate::services::DescriptionGenerator`].

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use types::GenerationConfig;

/// A remote text generation backend.
///
/// `Ok(None)` means the call succeeded but produced no text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single prompt.
    async fn generate_text(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<Option<String>, GeminiError>;
}
