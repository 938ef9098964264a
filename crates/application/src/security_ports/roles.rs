use advancely_core::{RoleId, TenantId, UserId};
use chrono::{DateTime, Utc};

/// Input payload for creating custom roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Validated role name, unique in tenant scope.
    pub name: String,
    /// Free-form description; may be empty.
    pub description: String,
}

/// Replacement name and description for a custom role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleUpdate {
    /// Role to rewrite.
    pub role_id: RoleId,
    /// Tenant the caller acts for; the write only matches roles it owns.
    pub tenant_id: TenantId,
    /// New role name.
    pub name: String,
    /// New role description.
    pub description: String,
}

/// Assignment projection mapping a user to a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Assigned user.
    pub user_id: UserId,
    /// Role identifier.
    pub role_id: RoleId,
    /// Role name.
    pub role_name: String,
    /// Whether the role is a system role.
    pub is_system: bool,
    /// Assignment timestamp.
    pub assigned_at: DateTime<Utc>,
}
