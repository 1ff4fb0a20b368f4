//! Account roles.

use serde::{Deserialize, Serialize};

/// Role attached to an account by the backend.
///
/// Fixed for the lifetime of a session; the backend never changes a
/// role after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular shopper.
    #[default]
    User,
    /// Seller with a store and product management access.
    Seller,
}

impl Role {
    /// Whether this role grants seller capabilities.
    #[must_use]
    pub const fn is_seller(self) -> bool {
        matches!(self, Self::Seller)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "\"seller\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"user\"").unwrap(),
            Role::User
        );
    }

    #[test]
    fn test_is_seller() {
        assert!(Role::Seller.is_seller());
        assert!(!Role::User.is_seller());
    }
}
