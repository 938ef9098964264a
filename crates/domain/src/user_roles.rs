use advancely_core::UserId;
use serde::{Deserialize, Serialize};

use crate::SystemRole;

/// One role held by a user, flattened for authorization checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    /// Role name.
    pub name: String,
    /// Whether the role is a global system role.
    pub is_system: bool,
    /// Permission tokens attached to the role.
    pub permissions: Vec<String>,
}

impl UserRole {
    /// Returns whether this role grants every permission.
    ///
    /// Only the `Admin` system role qualifies; a custom role that happens to
    /// share the name does not.
    #[must_use]
    pub fn grants_all(&self) -> bool {
        self.is_system && self.name == SystemRole::Admin.as_str()
    }
}

/// Every role and permission a user holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoleCollection {
    /// User the collection was loaded for.
    pub user_id: UserId,
    /// Roles held by the user.
    pub roles: Vec<UserRole>,
}

impl UserRoleCollection {
    /// Creates an empty collection for a user without roles.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            roles: Vec::new(),
        }
    }

    /// Returns whether any held role grants the permission token.
    #[must_use]
    pub fn has_permission(&self, permission_name: &str) -> bool {
        self.roles.iter().any(|role| {
            role.grants_all()
                || role
                    .permissions
                    .iter()
                    .any(|permission| permission == permission_name)
        })
    }

    /// Returns whether the collection holds no roles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use advancely_core::UserId;
    use proptest::prelude::*;

    use super::{UserRole, UserRoleCollection};

    fn collection(roles: Vec<UserRole>) -> UserRoleCollection {
        UserRoleCollection {
            user_id: UserId::new(),
            roles,
        }
    }

    fn admin() -> UserRole {
        UserRole {
            name: "Admin".to_owned(),
            is_system: true,
            permissions: Vec::new(),
        }
    }

    #[test]
    fn listed_permission_is_granted() {
        let roles = collection(vec![UserRole {
            name: "Support".to_owned(),
            is_system: false,
            permissions: vec!["edit-user".to_owned()],
        }]);

        assert!(roles.has_permission("edit-user"));
        assert!(!roles.has_permission("delete-user"));
    }

    #[test]
    fn custom_role_named_admin_does_not_bypass() {
        let roles = collection(vec![UserRole {
            name: "Admin".to_owned(),
            is_system: false,
            permissions: Vec::new(),
        }]);

        assert!(!roles.has_permission("delete-user"));
    }

    proptest! {
        #[test]
        fn admin_system_role_grants_any_permission(name in "[a-z-]{1,32}") {
            let roles = collection(vec![admin()]);
            prop_assert!(roles.has_permission(&name));
        }

        #[test]
        fn empty_collection_grants_nothing(name in "\\PC{0,32}") {
            let roles = UserRoleCollection::empty(UserId::new());
            prop_assert!(!roles.has_permission(&name));
        }

        #[test]
        fn grant_matches_exact_token_only(
            granted in proptest::collection::vec("[a-z]{1,12}", 0..6),
            requested in "[a-z]{1,12}",
        ) {
            let roles = collection(vec![UserRole {
                name: "Custom".to_owned(),
                is_system: false,
                permissions: granted.clone(),
            }]);
            prop_assert_eq!(roles.has_permission(&requested), granted.contains(&requested));
        }
    }
}
