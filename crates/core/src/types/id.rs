//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. IDs are opaque text
//! tokens: seed data uses short literals (`"1"`), generated ids come from an
//! [`IdGenerator`].

use uuid::Uuid;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use nexus_portal_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new("1");
/// let order_id = OrderId::new("1");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(ProductId);

/// Source of fresh textual ids.
///
/// Stores depend on this trait rather than on a concrete strategy so the
/// token format (and its collision probability) can change without touching
/// store logic.
pub trait IdGenerator: Send + Sync {
    /// Produce a new id token. Never empty.
    fn next_id(&self) -> String;
}

/// Generates random 128-bit tokens rendered in base 36.
///
/// Collisions are possible in principle but negligible at portal scale; the
/// catalog additionally re-draws on the rare hit.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        to_base36(Uuid::new_v4().as_u128())
    }
}

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Render an unsigned integer in lowercase base 36.
#[must_use]
pub fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(25);
    while value > 0 {
        // value % 36 is always < 36
        #[allow(clippy::cast_possible_truncation)]
        let digit = (value % 36) as usize;
        digits.push(char::from(BASE36_DIGITS[digit % BASE36_DIGITS.len()]));
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_base36_small_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
    }

    #[test]
    fn test_base36_max_value_fits() {
        let rendered = to_base36(u128::MAX);
        assert_eq!(rendered.len(), 25);
        assert!(rendered.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_ids_are_distinct() {
        let generator = RandomIdGenerator;
        let ids: HashSet<String> = (0..1000).map(|_| generator.next_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    #[test]
    fn test_id_display_and_serde() {
        let id = ProductId::new("abc123");
        assert_eq!(id.to_string(), "abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");

        let parsed: ProductId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(parsed, id);
    }
}
