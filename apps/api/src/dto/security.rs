use advancely_application::RoleAssignment;
use advancely_domain::{Permission, Role, RoleWithPermissions, UserRole, UserRoleCollection};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for custom role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Incoming payload for renaming a custom role.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-role-request.ts"
)]
pub struct UpdateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// API representation of a catalog permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub permission_id: i32,
    pub name: String,
    pub description: String,
    pub group: String,
}

impl From<Permission> for PermissionResponse {
    fn from(value: Permission) -> Self {
        Self {
            permission_id: value.id.as_i32(),
            name: value.name,
            description: value.description,
            group: value.group.name,
        }
    }
}

/// API representation of an RBAC role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub role_id: i32,
    pub company_id: Option<String>,
    pub name: String,
    pub description: String,
    pub is_system: bool,
    pub permissions: Vec<PermissionResponse>,
}

impl From<RoleWithPermissions> for RoleResponse {
    fn from(value: RoleWithPermissions) -> Self {
        let mut response = Self::from(value.role);
        response.permissions = value
            .permissions
            .into_iter()
            .map(PermissionResponse::from)
            .collect();
        response
    }
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            role_id: value.id().as_i32(),
            company_id: value.tenant_id().map(|tenant_id| tenant_id.to_string()),
            name: value.name().to_owned(),
            description: value.description().to_owned(),
            is_system: value.is_system(),
            permissions: Vec::new(),
        }
    }
}

/// API representation of a role assignment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-assignment-response.ts"
)]
pub struct RoleAssignmentResponse {
    pub user_id: String,
    pub role_id: i32,
    pub role_name: String,
    pub is_system: bool,
    pub assigned_at: String,
}

impl From<RoleAssignment> for RoleAssignmentResponse {
    fn from(value: RoleAssignment) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            role_id: value.role_id.as_i32(),
            role_name: value.role_name,
            is_system: value.is_system,
            assigned_at: value.assigned_at.to_rfc3339(),
        }
    }
}

/// One role held by the current user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-role-response.ts"
)]
pub struct UserRoleResponse {
    pub name: String,
    pub is_system: bool,
    pub permissions: Vec<String>,
}

impl From<UserRole> for UserRoleResponse {
    fn from(value: UserRole) -> Self {
        Self {
            name: value.name,
            is_system: value.is_system,
            permissions: value.permissions,
        }
    }
}

/// Roles and permission tokens held by the current user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-role-collection-response.ts"
)]
pub struct UserRoleCollectionResponse {
    pub user_id: String,
    pub roles: Vec<UserRoleResponse>,
}

impl From<UserRoleCollection> for UserRoleCollectionResponse {
    fn from(value: UserRoleCollection) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            roles: value.roles.into_iter().map(UserRoleResponse::from).collect(),
        }
    }
}
