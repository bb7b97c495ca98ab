//! Authentication extractors for the portal.
//!
//! Every access decision goes through [`RouteGuard`]; these extractors only
//! translate its verdict into HTTP. Page requests are redirected, `/api/`
//! requests get 401/403 instead.

use axum::{
    extract::FromRequestParts,
    http::{Method, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use nexus_portal_core::{IdGenerator, RandomIdGenerator};

use crate::error::{AppError, set_sentry_user};
use crate::models::{Identity, session_keys};
use crate::services::{GuardDecision, RouteGuard, Screen, SessionStore};
use crate::state::AppState;

/// The live session store of the requesting browser.
///
/// Mints a client token on first contact. Fails with a 500 if the session
/// layer is not installed.
pub struct PortalSession(pub SessionStore);

impl FromRequestParts<AppState> for PortalSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().cloned().ok_or_else(|| {
            tracing::error!("session layer missing; portal sessions unavailable");
            AppError::Internal("session layer not installed".to_string())
        })?;

        let token = if let Some(token) = session.get::<String>(session_keys::CLIENT_TOKEN).await? {
            token
        } else {
            let token = RandomIdGenerator.next_id();
            session.insert(session_keys::CLIENT_TOKEN, &token).await?;
            tracing::debug!("client token issued");
            token
        };

        Ok(Self(state.sessions().resolve(&token).await))
    }
}

/// Extractor that requires the caller to be allowed on the screen owning
/// the request path.
///
/// Unknown paths are treated as the landing screen.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireScreen(identity): RequireScreen) -> impl IntoResponse {
///     format!("Hello, {}!", identity.name)
/// }
/// ```
pub struct RequireScreen(pub Identity);

/// Extractor that requires permission to change the catalog.
pub struct RequireCatalogEditor(pub Identity);

/// Why a guarded request was turned away.
#[derive(Debug)]
pub enum GuardRejection {
    /// Send the browser elsewhere.
    Redirect(String),
    /// Not signed in (API requests).
    Unauthorized,
    /// Signed in without the needed role.
    Forbidden,
    /// The session could not be loaded.
    Failed(AppError),
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(to) => Redirect::to(&to).into_response(),
            Self::Unauthorized => {
                AppError::Unauthorized("sign in required".to_string()).into_response()
            }
            Self::Forbidden => {
                AppError::Forbidden("admin role required".to_string()).into_response()
            }
            Self::Failed(e) => e.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireScreen {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let screen = Screen::from_path(parts.uri.path()).unwrap_or(Screen::LANDING);
        guard(parts, state, screen).await.map(Self)
    }
}

impl FromRequestParts<AppState> for RequireCatalogEditor {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = guard(parts, state, Screen::Products).await?;
        if !RouteGuard::can_edit_catalog(&identity) {
            tracing::warn!(user_id = %identity.id, "catalog change refused");
            return Err(GuardRejection::Forbidden);
        }
        Ok(Self(identity))
    }
}

/// Resolve the caller and apply the guard for `screen`.
async fn guard(
    parts: &mut Parts,
    state: &AppState,
    screen: Screen,
) -> Result<Identity, GuardRejection> {
    let PortalSession(store) = PortalSession::from_request_parts(parts, state)
        .await
        .map_err(GuardRejection::Failed)?;

    let is_api = parts.uri.path().starts_with("/api/");
    let identity = store.current();

    match (RouteGuard::evaluate(screen, identity.as_ref()), identity) {
        (GuardDecision::Permit, Some(identity)) => {
            set_sentry_user(&identity);
            Ok(identity)
        }
        (GuardDecision::Permit, None) | (GuardDecision::Redirect(Screen::Login), _) => {
            if is_api {
                Err(GuardRejection::Unauthorized)
            } else {
                Err(GuardRejection::Redirect(login_redirect(parts, screen)))
            }
        }
        (GuardDecision::Redirect(target), _) => {
            if is_api {
                Err(GuardRejection::Forbidden)
            } else {
                Err(GuardRejection::Redirect(target.path().to_string()))
            }
        }
    }
}

/// Login URL that returns to the current page after sign-in.
fn login_redirect(parts: &Parts, screen: Screen) -> String {
    let next = if parts.method == Method::GET {
        parts
            .uri
            .path_and_query()
            .map_or_else(|| screen.path(), |pq| pq.as_str())
    } else {
        screen.path()
    };
    format!("{}?next={}", Screen::Login.path(), urlencoding::encode(next))
}

/// Where to go after sign-in: `next` if it is a local path, else the landing
/// screen.
#[must_use]
pub fn post_login_target(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(|c| c.is_control() || c.is_whitespace())
                && Screen::from_path(path.split('?').next().unwrap_or(path))
                    != Some(Screen::Login) =>
        {
            path
        }
        _ => Screen::LANDING.path(),
    }
}
