//! HTTP middleware and extractors for the portal.
//!
//! # Layer Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one hub per request)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Session layer (tower-sessions, in-memory store)
//!
//! Access control is done per handler with the extractors in [`auth`].

pub mod auth;
pub mod session;

pub use auth::{
    GuardRejection, PortalSession, RequireCatalogEditor, RequireScreen, post_login_target,
};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
