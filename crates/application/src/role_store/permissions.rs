use advancely_core::{AppError, AppResult, PermissionId, RoleId, TenantId};

use super::{RoleStore, ignore_duplicate};

impl RoleStore {
    /// Grants a catalog permission to a custom role. Granting twice succeeds.
    pub async fn assign_permission_to_role(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
        tenant_id: TenantId,
    ) -> AppResult<()> {
        self.mutable_role(role_id, tenant_id).await?;
        self.permission(permission_id).await?;

        let inserted = ignore_duplicate(
            self.roles
                .insert_role_permission(tenant_id, role_id, permission_id)
                .await,
        )?;
        if !inserted {
            return Err(AppError::RoleNotFound(role_id));
        }

        Ok(())
    }

    /// Revokes a catalog permission from a custom role. Absent grants are ignored.
    pub async fn remove_permission_from_role(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
        tenant_id: TenantId,
    ) -> AppResult<()> {
        self.mutable_role(role_id, tenant_id).await?;
        self.permission(permission_id).await?;

        self.roles
            .delete_role_permission(tenant_id, role_id, permission_id)
            .await
    }
}
