//! Application state shared across handlers.

use std::sync::Arc;

use nexus_portal_core::RandomIdGenerator;

use crate::config::PortalConfig;
use crate::gemini::{GeminiClient, GeminiError};
use crate::services::{
    DescriptionGenerator, InMemoryProductRepository, MockIdentityProvider, ProductRepository,
    SessionRegistry,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    sessions: SessionRegistry,
    catalog: Arc<dyn ProductRepository>,
    descriptions: DescriptionGenerator,
}

impl AppState {
    /// Build the production state: mock sign-in, seeded catalog, Gemini copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the Gemini HTTP client cannot be built.
    pub fn new(config: PortalConfig) -> Result<Self, GeminiError> {
        let ids = Arc::new(RandomIdGenerator);
        let provider = Arc::new(MockIdentityProvider::new(config.login_delay, ids.clone()));
        let gemini = GeminiClient::new(config.gemini())?;
        tracing::info!(model = gemini.model(), "Gemini client created");

        let descriptions =
            DescriptionGenerator::new(Arc::new(gemini), config.gemini().generation_config());

        Ok(Self::from_parts(
            config,
            SessionRegistry::new(provider),
            Arc::new(InMemoryProductRepository::seeded(ids)),
            descriptions,
        ))
    }

    /// Assemble state from explicit parts.
    #[must_use]
    pub fn from_parts(
        config: PortalConfig,
        sessions: SessionRegistry,
        catalog: Arc<dyn ProductRepository>,
        descriptions: DescriptionGenerator,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                sessions,
                catalog,
                descriptions,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.inner.sessions
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn ProductRepository {
        self.inner.catalog.as_ref()
    }

    #[must_use]
    pub fn descriptions(&self) -> &DescriptionGenerator {
        &self.inner.descriptions
    }
}
