//! Domain models for the portal.

pub mod dashboard;
pub mod directory;
pub mod identity;
pub mod product;

pub use dashboard::{CatalogSummary, DailyPoint, STAT_CARDS, StatCard, WEEKLY_SERIES};
pub use directory::{DirectoryEntry, SYSTEM_STATS, SystemStat, USER_DIRECTORY};
pub use identity::Identity;
pub use product::{Product, ProductDraft, ProductPatch, filter_products};

/// Keys stored in the tower-sessions session.
pub mod session_keys {
    /// Token that ties a browser session to its live session store.
    pub const CLIENT_TOKEN: &str = "client_token";
}
