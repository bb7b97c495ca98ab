//! Marketing copy for catalog products.

use std::sync::Arc;

use tracing::instrument;

use crate::gemini::{GenerationConfig, TextGenerator};

/// Shown when the generation call fails.
pub const GENERATION_FAILED_FALLBACK: &str =
    "Failed to generate description. Please enter manually.";

/// Shown when the generation call succeeds with no usable text.
pub const EMPTY_RESULT_FALLBACK: &str = "Quality product for everyday use.";

/// Build the instruction sent to the model.
#[must_use]
pub fn description_prompt(name: &str, category: &str) -> String {
    format!(
        "Write a compelling, professional, and concise one-sentence marketing description \
         for a product named \"{name}\" in the \"{category}\" category."
    )
}

/// Drafts one-sentence product descriptions.
///
/// [`Self::generate`] never fails: backend errors and empty answers map to
/// the two fallback sentences above, which stay distinct so the UI can tell
/// them apart.
#[derive(Clone)]
pub struct DescriptionGenerator {
    backend: Arc<dyn TextGenerator>,
    config: GenerationConfig,
}

impl DescriptionGenerator {
    /// Create a generator over `backend` with fixed sampling settings.
    #[must_use]
    pub fn new(backend: Arc<dyn TextGenerator>, config: GenerationConfig) -> Self {
        Self { backend, config }
    }

    /// Draft a description for a product named `name` in `category`.
    #[instrument(skip(self))]
    pub async fn generate(&self, name: &str, category: &str) -> String {
        let prompt = description_prompt(name, category);

        match self.backend.generate_text(&prompt, self.config).await {
            Ok(Some(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                tracing::warn!("description backend returned no text");
                EMPTY_RESULT_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::error!(error = %e, "description generation failed");
                GENERATION_FAILED_FALLBACK.to_string()
            }
        }
    }
}
