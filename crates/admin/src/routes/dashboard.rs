//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, response::IntoResponse, routing::get};
use tracing::instrument;

use crate::{
    filters,
    middleware::RequireScreen,
    models::{CatalogSummary, DailyPoint, Identity, STAT_CARDS, StatCard, WEEKLY_SERIES},
    services::{GuardDecision, RouteGuard, Screen},
    state::AppState,
};

/// Signed-in user view for templates.
#[derive(Debug, Clone)]
pub struct UserView {
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
    pub is_admin: bool,
}

impl From<&Identity> for UserView {
    fn from(identity: &Identity) -> Self {
        Self {
            name: identity.name.clone(),
            email: identity.email.to_string(),
            role: identity.role.to_string(),
            avatar: identity.avatar.clone(),
            is_admin: identity.is_admin(),
        }
    }
}

/// Sidebar navigation entry.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Navigation visible to `identity`, with `current` highlighted.
///
/// Screens the guard would bounce the user from are left out.
#[must_use]
pub fn navigation(identity: &Identity, current: Screen) -> Vec<NavItem> {
    [
        ("Dashboard", Screen::Dashboard),
        ("Products", Screen::Products),
        ("Admin Panel", Screen::Admin),
    ]
    .into_iter()
    .filter(|(_, screen)| {
        RouteGuard::evaluate(*screen, Some(identity)) == GuardDecision::Permit
    })
    .map(|(label, screen)| NavItem {
        label,
        href: screen.path(),
        active: screen == current,
    })
    .collect()
}

/// One bar of the weekly chart.
#[derive(Debug, Clone)]
pub struct ChartBar {
    pub day: &'static str,
    pub revenue: u32,
    pub users: u32,
    /// Revenue bar height relative to the week's peak (0-100).
    pub revenue_pct: u32,
    /// Users bar height relative to the week's peak (0-100).
    pub users_pct: u32,
}

fn chart_bars(series: &[DailyPoint]) -> Vec<ChartBar> {
    let peak = series
        .iter()
        .map(|p| p.revenue.max(p.users))
        .max()
        .unwrap_or(0)
        .max(1);

    series
        .iter()
        .map(|p| ChartBar {
            day: p.day,
            revenue: p.revenue,
            users: p.users,
            revenue_pct: p.revenue * 100 / peak,
            users_pct: p.users * 100 / peak,
        })
        .collect()
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user: UserView,
    pub nav: Vec<NavItem>,
    pub stats: Vec<StatCard>,
    pub chart: Vec<ChartBar>,
    pub catalog: CatalogSummary,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(index))
}

/// Dashboard page handler.
///
/// GET /dashboard
#[instrument(skip(identity, state), fields(user_id = %identity.id))]
async fn index(
    RequireScreen(identity): RequireScreen,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let products = state.catalog().list();

    DashboardTemplate {
        user: UserView::from(&identity),
        nav: navigation(&identity, Screen::Dashboard),
        stats: STAT_CARDS.to_vec(),
        chart: chart_bars(&WEEKLY_SERIES),
        catalog: CatalogSummary::from_products(&products),
    }
}
