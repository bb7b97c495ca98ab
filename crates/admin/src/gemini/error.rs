//! Error types for the Gemini API client.

use thiserror::Error;

/// Errors that can occur when calling the text generation API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API key configured.
    #[error("no API key configured")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited")]
    RateLimited,

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request URL could not be built.
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Error envelope returned by the API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Numeric code (mirrors the HTTP status).
    #[serde(default)]
    pub code: u16,
    /// Human-readable message.
    pub message: String,
    /// Canonical status, e.g. `INVALID_ARGUMENT`.
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_error_display() {
        let err = GeminiError::Api {
            status: 400,
            message: "API key not valid".to_string(),
        };
        assert_eq!(err.to_string(), "API error (400): API key not valid");
        assert_eq!(GeminiError::MissingApiKey.to_string(), "no API key configured");
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.error.code, 400);
        assert_eq!(response.error.status.as_deref(), Some("INVALID_ARGUMENT"));
    }
}
