//! Product description drafts from the command line.
//!
//! # Environment Variables
//!
//! Same as the portal: `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL`,
//! `GEMINI_TEMPERATURE`, `GEMINI_MAX_OUTPUT_TOKENS`.

use std::sync::Arc;

use thiserror::Error;

use nexus_portal_admin::config::{ConfigError, PortalConfig};
use nexus_portal_admin::gemini::{GeminiClient, GeminiError};
use nexus_portal_admin::services::DescriptionGenerator;

/// Errors that can occur while drafting a description.
#[derive(Debug, Error)]
pub enum DescribeError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The Gemini client could not be built.
    #[error("Gemini client error: {0}")]
    Client(#[from] GeminiError),

    /// A required argument was blank.
    #[error("{0} must not be empty")]
    Blank(&'static str),
}

/// Reject blank product names or categories.
fn validate<'a>(name: &'a str, category: &'a str) -> Result<(&'a str, &'a str), DescribeError> {
    let name = name.trim();
    let category = category.trim();
    if name.is_empty() {
        return Err(DescribeError::Blank("name"));
    }
    if category.is_empty() {
        return Err(DescribeError::Blank("category"));
    }
    Ok((name, category))
}

/// Draft a description and print it to stdout.
///
/// Generation failures are not errors: the fallback sentence is printed.
///
/// # Errors
///
/// Returns an error for blank arguments or unusable configuration.
#[allow(clippy::print_stdout)]
pub async fn run(name: &str, category: &str) -> Result<(), DescribeError> {
    let (name, category) = validate(name, category)?;

    let config = PortalConfig::from_env()?;
    let client = GeminiClient::new(config.gemini())?;
    tracing::info!(model = client.model(), "drafting description");

    let generator =
        DescriptionGenerator::new(Arc::new(client), config.gemini().generation_config());
    println!("{}", generator.generate(name, category).await);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims() {
        assert!(matches!(
            validate("  Quantum Mouse ", " Peripherals"),
            Ok(("Quantum Mouse", "Peripherals"))
        ));
    }

    #[test]
    fn test_validate_rejects_blank() {
        assert!(matches!(
            validate(" ", "Peripherals"),
            Err(DescribeError::Blank("name"))
        ));
        assert!(matches!(
            validate("Mouse", ""),
            Err(DescribeError::Blank("category"))
        ));
    }
}
