//! Business logic services for the portal.
//!
//! # Services
//!
//! - `session` - Per-session sign-in state and the identity provider seam
//! - `catalog` - In-memory product catalog
//! - `description` - Product copy drafting with fallbacks
//! - `guard` - Screen access rules

pub mod catalog;
pub mod description;
pub mod guard;
pub mod session;

pub use catalog::{InMemoryProductRepository, ProductRepository, seed_products};
pub use description::{
    DescriptionGenerator, EMPTY_RESULT_FALLBACK, GENERATION_FAILED_FALLBACK, description_prompt,
};
pub use guard::{GuardDecision, RouteGuard, Screen};
pub use session::{
    AuthError, IdentityProvider, MockIdentityProvider, SessionRegistry, SessionStore,
};
