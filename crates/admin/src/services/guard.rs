//! Access decisions for portal screens.
//!
//! One place decides who may see what: signed-out visitors go to the login
//! screen, non-admins are bounced from the admin panel to the dashboard, and
//! only admins may change the catalog.

use crate::models::Identity;

/// A top-level portal screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Dashboard,
    Products,
    Admin,
}

impl Screen {
    /// Where signed-in users land by default.
    pub const LANDING: Self = Self::Dashboard;

    /// URL path of the screen.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Products => "/products",
            Self::Admin => "/admin",
        }
    }

    /// Screen owning `path`, if any. Trailing slashes are ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "/login" => Some(Self::Login),
            "/dashboard" => Some(Self::Dashboard),
            "/products" => Some(Self::Products),
            "/admin" => Some(Self::Admin),
            _ if trimmed.starts_with("/products/") || trimmed.starts_with("/api/products") => {
                Some(Self::Products)
            }
            _ => None,
        }
    }

    /// Whether the screen is only for signed-in users.
    #[must_use]
    pub const fn requires_sign_in(self) -> bool {
        !matches!(self, Self::Login)
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested screen.
    Permit,
    /// Send the visitor elsewhere.
    Redirect(Screen),
}

/// Stateless access rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct RouteGuard;

impl RouteGuard {
    /// Decide whether `identity` may view `screen`.
    ///
    /// The login screen is open to everyone. Everything else needs a
    /// sign-in, and the admin panel needs the admin role.
    #[must_use]
    pub fn evaluate(screen: Screen, identity: Option<&Identity>) -> GuardDecision {
        if !screen.requires_sign_in() {
            return GuardDecision::Permit;
        }
        match identity {
            None => GuardDecision::Redirect(Screen::Login),
            Some(identity) if screen == Screen::Admin && !identity.is_admin() => {
                GuardDecision::Redirect(Screen::LANDING)
            }
            Some(_) => GuardDecision::Permit,
        }
    }

    /// Whether `identity` may add, edit, or delete products.
    #[must_use]
    pub fn can_edit_catalog(identity: &Identity) -> bool {
        identity.is_admin()
    }
}
