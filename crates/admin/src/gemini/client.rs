//! Gemini API client.
//!
//! Non-streaming `generateContent` access; one request per call, no retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use url::Url;

use crate::config::GeminiConfig;

use super::TextGenerator;
use super::error::{ApiErrorResponse, GeminiError};
use super::types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};

const API_KEY_HEADER: &str = "x-goog-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    model: String,
    base_url: Url,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// A missing API key is not an error here: every call will fail with
    /// [`GeminiError::MissingApiKey`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                api_key: config.api_key.clone(),
                model: config.model.clone(),
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// The model this client talks to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Endpoint URL for `generateContent` on the configured model.
    fn endpoint(&self) -> Result<Url, GeminiError> {
        let path = format!("v1beta/models/{}:generateContent", self.inner.model);
        Ok(self.inner.base_url.join(&path)?)
    }

    /// Send a `generateContent` request and return the parsed response.
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured, the request fails, the API
    /// answers with an error status, or the body cannot be parsed.
    #[instrument(skip(self, request), fields(model = %self.inner.model))]
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let api_key = self
            .inner
            .api_key
            .as_ref()
            .ok_or(GeminiError::MissingApiKey)?;

        let response = self
            .inner
            .client
            .post(self.endpoint()?)
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_status(status, response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))
    }

    /// Map an error status to a `GeminiError`.
    async fn error_from_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GeminiError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return GeminiError::RateLimited;
        }

        match response.text().await {
            Ok(body) => {
                let message = serde_json::from_str::<ApiErrorResponse>(&body)
                    .map_or(body, |api_error| api_error.error.message);
                GeminiError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
            Err(e) => GeminiError::Http(e),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<Option<String>, GeminiError> {
        let request = GenerateContentRequest::from_prompt(prompt, config);
        let response = self.generate_content(&request).await?;
        Ok(response.text())
    }
}
