//! Session store: who is signed in to one portal session.
//!
//! # Model
//!
//! A [`SessionStore`] holds at most one [`Identity`] plus an `is_loading`
//! flag raised while a sign-in is in flight. Sign-in goes through an
//! [`IdentityProvider`]; the shipped [`MockIdentityProvider`] accepts any
//! email/role after an artificial delay.
//!
//! # Ordering
//!
//! Two overlapping `login` calls on the same store are not ordered: each one
//! writes its identity when it resolves, so the last to finish wins. The
//! first to finish also lowers `is_loading` even if the other is still
//! pending. Nothing is cancelled; a superseded result simply overwrites. A
//! generation counter that discards stale completions would close this gap.
//!
//! Each browser session gets its own store through [`SessionRegistry`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use thiserror::Error;
use tracing::instrument;

use nexus_portal_core::{Email, IdGenerator, UserId, UserRole};

use crate::models::Identity;

/// Idle time after which an unused session store is dropped.
const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Upper bound on concurrently tracked sessions.
const MAX_SESSIONS: u64 = 10_000;

/// Errors a real identity backend can report.
///
/// The mock provider never produces these.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credentials were rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The identity backend could not be reached.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Backend that turns a sign-in request into an identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate `email` for `role`.
    async fn authenticate(&self, email: &Email, role: UserRole) -> Result<Identity, AuthError>;
}

/// Accepts every sign-in after a fixed delay and fabricates the identity.
pub struct MockIdentityProvider {
    delay: Duration,
    ids: Arc<dyn IdGenerator>,
}

impl MockIdentityProvider {
    /// Create a provider that answers after `delay`.
    #[must_use]
    pub fn new(delay: Duration, ids: Arc<dyn IdGenerator>) -> Self {
        Self { delay, ids }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn authenticate(&self, email: &Email, role: UserRole) -> Result<Identity, AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(Identity::fabricate(
            UserId::new(self.ids.next_id()),
            email.clone(),
            role,
        ))
    }
}

#[derive(Debug, Default)]
struct SessionState {
    identity: Option<Identity>,
    is_loading: bool,
}

/// Sign-in state of one portal session.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    provider: Arc<dyn IdentityProvider>,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Create a signed-out store backed by `provider`.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                provider,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Sign in as `email` with `role`.
    ///
    /// `is_loading` is true from the call until the provider answers; the
    /// identity is stored and the flag lowered in one step, so observers
    /// never see `is_authenticated` flip before loading ends.
    ///
    /// # Errors
    ///
    /// Returns the provider's error. The mock provider never fails. On error
    /// the previous identity is kept.
    #[instrument(skip(self), fields(email = %email, role = %role))]
    pub async fn login(&self, email: Email, role: UserRole) -> Result<Identity, AuthError> {
        self.state().is_loading = true;

        let result = self.inner.provider.authenticate(&email, role).await;

        let mut state = self.state();
        state.is_loading = false;
        match result {
            Ok(identity) => {
                state.identity = Some(identity.clone());
                tracing::info!(user_id = %identity.id, "signed in");
                Ok(identity)
            }
            Err(e) => {
                tracing::warn!(error = %e, "sign-in rejected");
                Err(e)
            }
        }
    }

    /// Sign out. Always succeeds.
    pub fn logout(&self) {
        if let Some(identity) = self.state().identity.take() {
            tracing::info!(user_id = %identity.id, "signed out");
        }
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.state().identity.clone()
    }

    /// Whether someone is signed in. Derived from [`Self::current`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state().identity.is_some()
    }

    /// Whether a sign-in is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }
}

/// Live session stores keyed by browser session token.
#[derive(Clone)]
pub struct SessionRegistry {
    provider: Arc<dyn IdentityProvider>,
    stores: Cache<String, SessionStore>,
}

impl SessionRegistry {
    /// Create a registry whose stores sign in through `provider`.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let stores = Cache::builder()
            .max_capacity(MAX_SESSIONS)
            .time_to_idle(SESSION_IDLE_TIMEOUT)
            .build();
        Self { provider, stores }
    }

    /// The store for `token`, created signed-out on first use.
    pub async fn resolve(&self, token: &str) -> SessionStore {
        let provider = Arc::clone(&self.provider);
        self.stores
            .get_with(token.to_string(), async move { SessionStore::new(provider) })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nexus_portal_core::RandomIdGenerator;

    use super::*;

    const DELAY: Duration = Duration::from_millis(800);

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MockIdentityProvider::new(
            DELAY,
            Arc::new(RandomIdGenerator),
        )))
    }

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    struct RejectingProvider;

    #[async_trait]
    impl IdentityProvider for RejectingProvider {
        async fn authenticate(&self, _: &Email, _: UserRole) -> Result<Identity, AuthError> {
            Err(AuthError::InvalidCredentials)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_yields_requested_identity() {
        let store = store();
        let identity = store.login(email("jane@nexus.io"), UserRole::User).await.unwrap();

        assert_eq!(identity.email.as_str(), "jane@nexus.io");
        assert_eq!(identity.role, UserRole::User);
        assert_eq!(identity.name, "JANE");
        assert!(!identity.id.as_str().is_empty());
        assert_eq!(store.current(), Some(identity));
        assert!(store.is_authenticated());
        assert!(!store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flag_raised_while_pending() {
        let store = store();
        let pending = {
            let store = store.clone();
            tokio::spawn(async move { store.login(email("admin@nexus.io"), UserRole::Admin).await })
        };

        while !store.is_loading() {
            tokio::task::yield_now().await;
        }
        assert!(!store.is_authenticated());

        pending.await.unwrap().unwrap();
        assert!(!store.is_loading());
        assert!(store.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_takes_configured_delay() {
        let store = store();
        let started = tokio::time::Instant::now();
        store.login(email("a@b.c"), UserRole::User).await.unwrap();
        assert!(started.elapsed() >= DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_always_clears() {
        let store = store();
        store.logout();
        assert!(!store.is_authenticated());

        store.login(email("a@b.c"), UserRole::Admin).await.unwrap();
        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_resolved_login_wins() {
        let store = store();

        let first = {
            let store = store.clone();
            tokio::spawn(async move { store.login(email("first@nexus.io"), UserRole::Admin).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = {
            let store = store.clone();
            tokio::spawn(async move { store.login(email("second@nexus.io"), UserRole::User).await })
        };

        first.await.unwrap().unwrap();
        // The earlier completion lowers the flag while the later one is pending.
        assert!(!store.is_loading());
        assert_eq!(store.current().unwrap().email.as_str(), "first@nexus.io");

        second.await.unwrap().unwrap();
        let current = store.current().unwrap();
        assert_eq!(current.email.as_str(), "second@nexus.io");
        assert_eq!(current.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_state() {
        let store = SessionStore::new(Arc::new(RejectingProvider));
        let err = store.login(email("a@b.c"), UserRole::Admin).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!store.is_authenticated());
        assert!(!store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_registry_isolates_sessions() {
        let registry = SessionRegistry::new(Arc::new(MockIdentityProvider::new(
            DELAY,
            Arc::new(RandomIdGenerator),
        )));

        let alice = registry.resolve("token-a").await;
        alice.login(email("alice@nexus.io"), UserRole::Admin).await.unwrap();

        assert!(registry.resolve("token-a").await.is_authenticated());
        assert!(!registry.resolve("token-b").await.is_authenticated());
    }
}
