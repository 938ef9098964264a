use std::str::FromStr;

use advancely_core::{AppError, PermissionId};
use serde::{Deserialize, Serialize};

/// Stable permission tokens seeded into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionName {
    /// Allows inviting users into the company.
    CreateUser,
    /// Allows editing user profiles.
    EditUser,
    /// Allows removing users.
    DeleteUser,
    /// Allows creating custom roles.
    CreateRole,
    /// Allows editing custom roles and their permission sets.
    EditRole,
    /// Allows deleting custom roles.
    DeleteRole,
    /// Allows granting roles to users.
    AssignUserRole,
    /// Allows revoking roles from users.
    RemoveUserRole,
    /// Allows changing organization settings such as allowed email domains.
    EditOrganizationSettings,
}

impl PermissionName {
    /// Returns the stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateUser => "create-user",
            Self::EditUser => "edit-user",
            Self::DeleteUser => "delete-user",
            Self::CreateRole => "create-role",
            Self::EditRole => "edit-role",
            Self::DeleteRole => "delete-role",
            Self::AssignUserRole => "assign-user-role",
            Self::RemoveUserRole => "remove-user-role",
            Self::EditOrganizationSettings => "edit-organization-settings",
        }
    }

    /// Returns the catalog group the permission is filed under.
    #[must_use]
    pub fn group(&self) -> PermissionGroupName {
        match self {
            Self::CreateUser | Self::EditUser | Self::DeleteUser => PermissionGroupName::Users,
            Self::CreateRole
            | Self::EditRole
            | Self::DeleteRole
            | Self::AssignUserRole
            | Self::RemoveUserRole => PermissionGroupName::UserManagement,
            Self::EditOrganizationSettings => PermissionGroupName::Organization,
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionName] = &[
            PermissionName::CreateUser,
            PermissionName::EditUser,
            PermissionName::DeleteUser,
            PermissionName::CreateRole,
            PermissionName::EditRole,
            PermissionName::DeleteRole,
            PermissionName::AssignUserRole,
            PermissionName::RemoveUserRole,
            PermissionName::EditOrganizationSettings,
        ];

        ALL
    }
}

impl FromStr for PermissionName {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

/// Groups used to organise the catalog for administrative views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionGroupName {
    /// User lifecycle permissions.
    Users,
    /// Role and assignment administration.
    UserManagement,
    /// Company-wide settings.
    Organization,
}

impl PermissionGroupName {
    /// Returns the stable storage value for this group.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::UserManagement => "user-management",
            Self::Organization => "organization",
        }
    }
}

/// Permission group row from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGroup {
    /// Stable group identifier.
    pub id: i32,
    /// Group name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Catalog identifier.
    pub id: PermissionId,
    /// Unique stable token, for example `create-role`.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Group the permission belongs to.
    pub group: PermissionGroup,
}
