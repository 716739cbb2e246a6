//! User identity types.
//!
//! Created on successful login, held in the session store for the session's
//! lifetime, cleared on logout or unrecoverable auth failure.

use serde::{Deserialize, Serialize};

use crate::types::id::{RoleId, UserId};

impl RoleId {
    /// The administrator role, which gates product management.
    pub const ADMIN: Self = Self::new(1);
}

/// An authenticated storefront user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name / login name.
    pub username: String,
    /// User's email address.
    pub email: String,
    /// Role identifier; `RoleId::ADMIN` unlocks admin views.
    pub role_id: RoleId,
}

impl User {
    /// Whether this user may access administrative operations.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role_id == RoleId::ADMIN
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(role_id: i32) -> User {
        User {
            id: UserId::new(1),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role_id: RoleId::new(role_id),
        }
    }

    #[test]
    fn test_role_one_is_admin() {
        assert!(user(1).is_admin());
        assert!(!user(2).is_admin());
    }

    #[test]
    fn test_user_wire_shape() {
        let parsed: User = serde_json::from_value(serde_json::json!({
            "id": 3,
            "username": "bob",
            "email": "bob@example.com",
            "role_id": 2,
        }))
        .unwrap();
        assert_eq!(parsed.id, UserId::new(3));
        assert_eq!(parsed.username, "bob");
        assert_eq!(parsed.role_id, RoleId::new(2));
        assert!(!parsed.is_admin());
    }
}
