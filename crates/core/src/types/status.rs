//! Status and role enums.

use serde::{Deserialize, Serialize};

/// Catalog lifecycle status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Listed and sellable.
    #[default]
    Active,
    /// Being prepared, not yet listed.
    Draft,
    /// Retired from the catalog.
    Archived,
}

impl ProductStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Draft, Self::Archived];

    /// Returns the wire/display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Draft => "draft",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "draft" => Ok(Self::Draft),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// Portal user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Full access including catalog edits and the admin panel.
    Admin,
    /// Read-only access to the dashboard and catalog.
    #[default]
    User,
}

impl UserRole {
    /// Returns the wire/display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_status_roundtrip() {
        for status in ProductStatus::ALL {
            assert_eq!(status.as_str().parse::<ProductStatus>().unwrap(), status);
        }
        assert!("deleted".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_product_status_serde() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::Draft).unwrap(),
            "\"draft\""
        );
    }

    #[test]
    fn test_user_role_wire_format() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        let role: UserRole = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, UserRole::User);
        assert!("admin".parse::<UserRole>().is_err());
    }
}
