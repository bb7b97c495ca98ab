//! Admin panel route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, response::IntoResponse, routing::get};
use tracing::instrument;

use crate::{
    filters,
    middleware::RequireScreen,
    models::{DirectoryEntry, SYSTEM_STATS, SystemStat, USER_DIRECTORY},
    services::Screen,
    state::AppState,
};

use super::dashboard::{NavItem, UserView, navigation};

/// Runtime settings shown to admins.
#[derive(Debug, Clone)]
pub struct SystemView {
    pub model: String,
    pub generation_enabled: bool,
    pub login_delay_ms: u128,
    pub secure_cookies: bool,
}

/// Admin panel template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct AdminPanelTemplate {
    pub user: UserView,
    pub nav: Vec<NavItem>,
    pub stats: Vec<SystemStat>,
    pub directory: Vec<DirectoryEntry>,
    pub system: SystemView,
}

/// Build the admin panel router.
pub fn router() -> Router<AppState> {
    Router::new().route("/admin", get(index))
}

/// Admin panel page handler. Non-admins are sent to the dashboard.
///
/// GET /admin
#[instrument(skip(identity, state), fields(user_id = %identity.id))]
async fn index(
    RequireScreen(identity): RequireScreen,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let config = state.config();

    AdminPanelTemplate {
        user: UserView::from(&identity),
        nav: navigation(&identity, Screen::Admin),
        stats: SYSTEM_STATS.to_vec(),
        directory: USER_DIRECTORY.to_vec(),
        system: SystemView {
            model: config.gemini().model.clone(),
            generation_enabled: config.gemini().api_key.is_some(),
            login_delay_ms: config.login_delay.as_millis(),
            secure_cookies: config.is_secure(),
        },
    }
}
