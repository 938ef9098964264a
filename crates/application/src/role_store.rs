use std::sync::Arc;

use advancely_core::{AppError, AppResult, PermissionId, RoleId, TenantId};
use advancely_domain::{Permission, RoleWithPermissions};

use crate::security_ports::{PermissionCatalog, RoleRepository, UserRoleRepository};

mod permissions;
mod roles;
mod user_roles;

/// Tenant-scoped role, permission and user-role management.
///
/// Every operation resolves roles through the tenant scoping rule first,
/// rejects system roles for mutations, and then issues a conditional write
/// that repeats the same filter.
#[derive(Clone)]
pub struct RoleStore {
    roles: Arc<dyn RoleRepository>,
    permissions: Arc<dyn PermissionCatalog>,
    user_roles: Arc<dyn UserRoleRepository>,
}

impl RoleStore {
    /// Creates a role store from repository implementations.
    #[must_use]
    pub fn new(
        roles: Arc<dyn RoleRepository>,
        permissions: Arc<dyn PermissionCatalog>,
        user_roles: Arc<dyn UserRoleRepository>,
    ) -> Self {
        Self {
            roles,
            permissions,
            user_roles,
        }
    }

    /// Returns a catalog permission.
    pub async fn permission(&self, permission_id: PermissionId) -> AppResult<Permission> {
        self.permissions
            .find_permission(permission_id)
            .await?
            .ok_or(AppError::PermissionNotFound(permission_id))
    }

    /// Returns the whole permission catalog.
    pub async fn permissions(&self) -> AppResult<Vec<Permission>> {
        self.permissions.list_permissions().await
    }

    /// Resolves a custom role the tenant may mutate.
    async fn mutable_role(
        &self,
        role_id: RoleId,
        tenant_id: TenantId,
    ) -> AppResult<RoleWithPermissions> {
        let role = self.role(role_id, Some(tenant_id)).await?;
        if role.role.is_system() {
            return Err(AppError::CannotUpdateSystemRole(role_id));
        }

        Ok(role)
    }
}

/// Treats an existing association as a successful insert.
fn ignore_duplicate(result: AppResult<bool>) -> AppResult<bool> {
    match result {
        Err(AppError::Conflict(_)) => Ok(true),
        other => other,
    }
}
