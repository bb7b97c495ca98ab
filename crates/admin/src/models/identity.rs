//! Signed-in identity.

use serde::{Deserialize, Serialize};

use nexus_portal_core::{Email, UserId, UserRole};

/// The authenticated user of one portal session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Session-scoped user ID.
    pub id: UserId,
    /// Submitted email address.
    pub email: Email,
    /// Display name (upper-cased email local part).
    pub name: String,
    /// Permission level.
    pub role: UserRole,
    /// Avatar image URL.
    pub avatar: String,
}

impl Identity {
    /// Build the identity the mock provider hands out for `email` and `role`.
    #[must_use]
    pub fn fabricate(id: UserId, email: Email, role: UserRole) -> Self {
        let avatar = format!(
            "https://picsum.photos/seed/{}/200",
            urlencoding::encode(email.as_str())
        );
        Self {
            id,
            name: email.display_name(),
            email,
            role,
            avatar,
        }
    }

    /// Whether this identity holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fabricate_derives_display_fields() {
        let email = Email::parse("admin@nexus.io").unwrap();
        let identity = Identity::fabricate(UserId::new("u1"), email.clone(), UserRole::Admin);

        assert_eq!(identity.email, email);
        assert_eq!(identity.name, "ADMIN");
        assert_eq!(identity.avatar, "https://picsum.photos/seed/admin%40nexus.io/200");
        assert!(identity.is_admin());
    }
}
