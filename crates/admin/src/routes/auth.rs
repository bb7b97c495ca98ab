//! Authentication route handlers.
//!
//! Sign-in is a plain form: any well-formed email with either role is
//! accepted by the identity provider.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use nexus_portal_core::{Email, UserRole};

use crate::error::clear_sentry_user;
use crate::filters;
use crate::middleware::{PortalSession, post_login_target};
use crate::services::{AuthError, Screen};
use crate::state::AppState;

/// Email pre-filled on the login form.
pub const DEFAULT_LOGIN_EMAIL: &str = "admin@nexus.io";

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub role: Option<String>,
    pub next: Option<String>,
}

/// Query parameters of the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub role: UserRole,
    pub next: String,
    pub error: Option<String>,
}

impl LoginTemplate {
    fn blank(next: Option<&str>) -> Self {
        Self {
            email: DEFAULT_LOGIN_EMAIL.to_string(),
            role: UserRole::Admin,
            next: post_login_target(next).to_string(),
            error: None,
        }
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", axum::routing::post(logout))
}

/// Render the login page, or skip it when already signed in.
///
/// GET /login
#[instrument(skip(session))]
async fn login_page(
    PortalSession(session): PortalSession,
    Query(query): Query<LoginQuery>,
) -> Response {
    if session.is_authenticated() {
        return Redirect::to(post_login_target(query.next.as_deref())).into_response();
    }
    LoginTemplate::blank(query.next.as_deref()).into_response()
}

/// Sign in and continue to the requested screen.
///
/// POST /login
#[instrument(skip(session, form), fields(email = %form.email))]
async fn login(PortalSession(session): PortalSession, Form(form): Form<LoginForm>) -> Response {
    let role = match form.role.as_deref().map(str::trim) {
        None | Some("") => Ok(UserRole::Admin),
        Some(raw) => raw.parse::<UserRole>(),
    };
    // Keep the submitted role selected when the form comes back.
    let selected = role.as_ref().copied().unwrap_or(UserRole::Admin);

    let rerender = |status: StatusCode, error: String| {
        let template = LoginTemplate {
            email: form.email.clone(),
            role: selected,
            next: post_login_target(form.next.as_deref()).to_string(),
            error: Some(error),
        };
        (status, template).into_response()
    };

    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => return rerender(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let role = match role {
        Ok(role) => role,
        Err(e) => return rerender(StatusCode::BAD_REQUEST, e),
    };

    match session.login(email, role).await {
        Ok(_) => Redirect::to(post_login_target(form.next.as_deref())).into_response(),
        Err(e @ AuthError::InvalidCredentials) => rerender(StatusCode::UNAUTHORIZED, e.to_string()),
        Err(e @ AuthError::Unavailable(_)) => {
            rerender(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}

/// Sign out and return to the login page.
///
/// POST /logout
#[instrument(skip(session))]
async fn logout(PortalSession(session): PortalSession) -> impl IntoResponse {
    session.logout();
    clear_sentry_user();
    Redirect::to(Screen::Login.path())
}
