use async_trait::async_trait;

use advancely_core::{AppResult, PermissionId, RoleId, TenantId, UserId};
use advancely_domain::{Permission, Role, RoleWithPermissions, SystemRole};

use super::roles::{CreateRoleInput, RoleAssignment, RoleUpdate};

/// Read-only port over the permission catalog seeded at deployment.
#[async_trait]
pub trait PermissionCatalog: Send + Sync {
    /// Finds one catalog entry with its group.
    async fn find_permission(&self, permission_id: PermissionId) -> AppResult<Option<Permission>>;

    /// Lists the catalog ordered by group then permission id.
    async fn list_permissions(&self) -> AppResult<Vec<Permission>>;
}

/// Repository port for role definitions and their permission sets.
///
/// Every lookup applies the tenant scoping rule: a role is returned when it
/// belongs to the tenant or is a system role. Every write repeats the tenant
/// and non-system filter so it can only touch custom roles of that tenant.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Finds a role visible to the tenant; `None` tenant matches system roles only.
    async fn find_role(
        &self,
        role_id: RoleId,
        tenant_id: Option<TenantId>,
    ) -> AppResult<Option<RoleWithPermissions>>;

    /// Finds a built-in role by name.
    async fn find_system_role(&self, role: SystemRole) -> AppResult<Option<Role>>;

    /// Lists tenant roles and system roles ordered by role id.
    async fn list_roles(&self, tenant_id: TenantId) -> AppResult<Vec<RoleWithPermissions>>;

    /// Creates a custom role. Reports `Conflict` when the name is taken in the tenant.
    async fn create_role(&self, tenant_id: TenantId, input: CreateRoleInput) -> AppResult<Role>;

    /// Rewrites a custom role owned by the tenant.
    ///
    /// Returns `None` when no custom role of the tenant matched.
    async fn update_custom_role(&self, update: RoleUpdate) -> AppResult<Option<Role>>;

    /// Deletes a custom role owned by the tenant together with its associations.
    ///
    /// Returns `false` when no custom role of the tenant matched.
    async fn delete_custom_role(&self, tenant_id: TenantId, role_id: RoleId) -> AppResult<bool>;

    /// Associates a permission with a custom role owned by the tenant.
    ///
    /// Reports `Conflict` when the association exists and returns `false`
    /// when no custom role of the tenant matched.
    async fn insert_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<bool>;

    /// Removes a permission from a custom role owned by the tenant; absent rows are ignored.
    async fn delete_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()>;
}

/// Repository port for user-role associations.
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// Associates a member of the tenant with a role visible to the tenant.
    ///
    /// Reports `Conflict` when the association exists and returns `false`
    /// when the role is not visible to the tenant or the user is not a
    /// member of it.
    async fn insert_user_role(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        user_id: UserId,
    ) -> AppResult<bool>;

    /// Removes a user-role association scoped to the tenant; absent rows are ignored.
    async fn delete_user_role(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        user_id: UserId,
    ) -> AppResult<()>;

    /// Lists role assignments held by members of the tenant.
    async fn list_role_assignments(&self, tenant_id: TenantId) -> AppResult<Vec<RoleAssignment>>;
}
