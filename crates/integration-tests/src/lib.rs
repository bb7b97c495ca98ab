//! Integration test harness for the Nexus portal.
//!
//! [`TestPortal::spawn`] serves the full portal router on an ephemeral
//! loopback port with instant sign-in and a scripted text generator, and
//! hands back a cookie-keeping client that does not follow redirects.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nexus-portal-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, redirect};

use nexus_portal_admin::config::PortalConfig;
use nexus_portal_admin::gemini::{GeminiError, GenerationConfig, TextGenerator};
use nexus_portal_admin::services::{
    DescriptionGenerator, InMemoryProductRepository, MockIdentityProvider, ProductRepository,
    SessionRegistry,
};
use nexus_portal_admin::state::AppState;
use nexus_portal_core::RandomIdGenerator;

/// Text generator with a canned answer.
pub enum ScriptedGenerator {
    /// Always answers with this text.
    Text(String),
    /// Succeeds without text.
    Empty,
    /// Always fails.
    Failing,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(
        &self,
        _prompt: &str,
        _config: GenerationConfig,
    ) -> Result<Option<String>, GeminiError> {
        match self {
            Self::Text(text) => Ok(Some(text.clone())),
            Self::Empty => Ok(None),
            Self::Failing => Err(GeminiError::Api {
                status: 500,
                message: "backend unavailable".to_string(),
            }),
        }
    }
}

/// Portal state with instant sign-in, the seeded catalog, and `generator`.
///
/// Returns the catalog handle alongside for direct assertions.
#[must_use]
pub fn portal_state(generator: ScriptedGenerator) -> (AppState, Arc<dyn ProductRepository>) {
    let config = PortalConfig {
        login_delay: Duration::ZERO,
        ..PortalConfig::default()
    };
    let ids = Arc::new(RandomIdGenerator);
    let catalog: Arc<dyn ProductRepository> =
        Arc::new(InMemoryProductRepository::seeded(ids.clone()));
    let descriptions =
        DescriptionGenerator::new(Arc::new(generator), config.gemini().generation_config());
    let provider = Arc::new(MockIdentityProvider::new(config.login_delay, ids));

    let state = AppState::from_parts(
        config,
        SessionRegistry::new(provider),
        Arc::clone(&catalog),
        descriptions,
    );
    (state, catalog)
}

/// A running portal plus a client bound to one browser session.
pub struct TestPortal {
    pub addr: SocketAddr,
    pub client: Client,
    pub catalog: Arc<dyn ProductRepository>,
}

impl TestPortal {
    /// Start a portal seeded with the launch catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the client cannot be
    /// built.
    pub async fn spawn(generator: ScriptedGenerator) -> Result<Self, Box<dyn std::error::Error>> {
        let (state, catalog) = portal_state(generator);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = nexus_portal_admin::app(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            client: Self::browser()?,
            catalog,
        })
    }

    /// A fresh cookie-keeping client, i.e. a second browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn browser() -> Result<Client, reqwest::Error> {
        Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit the login form as `email` with `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn login(&self, email: &str, role: &str) -> Result<Response, reqwest::Error> {
        self.client
            .post(self.url("/login"))
            .form(&[("email", email), ("role", role)])
            .send()
            .await
    }
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
