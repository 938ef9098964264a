use advancely_core::{AppResult, PermissionId, RoleId, UserIdentity};
use advancely_domain::{Permission, PermissionName, Role, RoleWithPermissions};

use crate::security_ports::{CreateRoleInput, RoleUpdate};

use super::SecurityAdminService;

impl SecurityAdminService {
    /// Lists roles visible to the actor's tenant.
    pub async fn roles(&self, actor: &UserIdentity) -> AppResult<Vec<RoleWithPermissions>> {
        self.role_store.roles(actor.tenant_id()).await
    }

    /// Returns one role visible to the actor's tenant.
    pub async fn role(
        &self,
        actor: &UserIdentity,
        role_id: RoleId,
    ) -> AppResult<RoleWithPermissions> {
        self.role_store.role(role_id, Some(actor.tenant_id())).await
    }

    /// Lists the permission catalog.
    pub async fn permissions(&self, _actor: &UserIdentity) -> AppResult<Vec<Permission>> {
        self.role_store.permissions().await
    }

    /// Creates a custom role in the actor's tenant.
    pub async fn create_role(&self, actor: &UserIdentity, input: CreateRoleInput) -> AppResult<Role> {
        self.require(actor, PermissionName::CreateRole).await?;

        let role = self
            .role_store
            .create_role(actor.tenant_id(), &input.name, &input.description)
            .await?;

        tracing::info!(
            tenant_id = %actor.tenant_id(),
            actor = %actor.user_id(),
            role_id = %role.id(),
            role_name = role.name(),
            "created role"
        );

        Ok(role)
    }

    /// Renames or re-describes a custom role.
    pub async fn update_role(
        &self,
        actor: &UserIdentity,
        role_id: RoleId,
        name: String,
        description: String,
    ) -> AppResult<Role> {
        self.require(actor, PermissionName::EditRole).await?;

        let role = self
            .role_store
            .update_role(RoleUpdate {
                role_id,
                tenant_id: actor.tenant_id(),
                name,
                description,
            })
            .await?;

        tracing::info!(
            tenant_id = %actor.tenant_id(),
            actor = %actor.user_id(),
            role_id = %role_id,
            "updated role"
        );

        Ok(role)
    }

    /// Deletes a custom role.
    pub async fn delete_role(&self, actor: &UserIdentity, role_id: RoleId) -> AppResult<()> {
        self.require(actor, PermissionName::DeleteRole).await?;

        self.role_store
            .delete_role(role_id, actor.tenant_id())
            .await?;

        tracing::info!(
            tenant_id = %actor.tenant_id(),
            actor = %actor.user_id(),
            role_id = %role_id,
            "deleted role"
        );

        Ok(())
    }

    /// Grants a permission to a custom role.
    pub async fn assign_permission(
        &self,
        actor: &UserIdentity,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.require(actor, PermissionName::EditRole).await?;

        self.role_store
            .assign_permission_to_role(role_id, permission_id, actor.tenant_id())
            .await?;

        tracing::info!(
            tenant_id = %actor.tenant_id(),
            actor = %actor.user_id(),
            role_id = %role_id,
            permission_id = %permission_id,
            "granted permission to role"
        );

        Ok(())
    }

    /// Revokes a permission from a custom role.
    pub async fn remove_permission(
        &self,
        actor: &UserIdentity,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.require(actor, PermissionName::EditRole).await?;

        self.role_store
            .remove_permission_from_role(role_id, permission_id, actor.tenant_id())
            .await?;

        tracing::info!(
            tenant_id = %actor.tenant_id(),
            actor = %actor.user_id(),
            role_id = %role_id,
            permission_id = %permission_id,
            "revoked permission from role"
        );

        Ok(())
    }
}
