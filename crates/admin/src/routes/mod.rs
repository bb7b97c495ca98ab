//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /                           - Redirect to the dashboard
//!
//! # Auth
//! GET  /login                      - Login form (?next= return path)
//! POST /login                      - Sign in
//! POST /logout                     - Sign out
//!
//! # Dashboard
//! GET  /dashboard                  - Stats and catalog figures
//!
//! # Products (edits are admin only)
//! GET  /products                   - Product listing (?q= search)
//! POST /products                   - Add product
//! POST /products/{id}              - Update product
//! POST /products/{id}/delete       - Delete product
//! POST /api/products/describe      - Draft a description (JSON)
//!
//! # Admin (admin only)
//! GET  /admin                      - User directory and system settings
//! ```
//!
//! Unknown paths redirect to the dashboard.

pub mod admin_panel;
pub mod auth;
pub mod dashboard;
pub mod products;

use axum::{Router, response::Redirect, routing::get};

use crate::services::Screen;
use crate::state::AppState;

/// Build the portal router (without state or layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/", get(landing))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(products::router())
        .merge(admin_panel::router())
        .fallback(landing)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

async fn landing() -> Redirect {
    Redirect::to(Screen::LANDING.path())
}
