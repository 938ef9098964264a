use advancely_core::{AppResult, RoleId, UserId, UserIdentity};
use advancely_domain::{PermissionName, UserRoleCollection};

use crate::security_ports::RoleAssignment;

use super::SecurityAdminService;

impl SecurityAdminService {
    /// Returns the roles and permissions held by the actor.
    pub async fn current_user_roles(&self, actor: &UserIdentity) -> AppResult<UserRoleCollection> {
        self.authorization_service.user_roles(actor.user_id()).await
    }

    /// Assigns a role to a user of the actor's tenant.
    pub async fn assign_role_to_user(
        &self,
        actor: &UserIdentity,
        role_id: RoleId,
        user_id: UserId,
    ) -> AppResult<()> {
        self.require(actor, PermissionName::AssignUserRole).await?;

        self.role_store
            .assign_role_to_user(role_id, user_id, actor.tenant_id())
            .await?;

        tracing::info!(
            tenant_id = %actor.tenant_id(),
            actor = %actor.user_id(),
            role_id = %role_id,
            user_id = %user_id,
            "assigned role to user"
        );

        Ok(())
    }

    /// Removes a role from a user of the actor's tenant.
    pub async fn remove_role_from_user(
        &self,
        actor: &UserIdentity,
        role_id: RoleId,
        user_id: UserId,
    ) -> AppResult<()> {
        self.require(actor, PermissionName::RemoveUserRole).await?;

        self.role_store
            .remove_role_from_user(role_id, user_id, actor.tenant_id())
            .await?;

        tracing::info!(
            tenant_id = %actor.tenant_id(),
            actor = %actor.user_id(),
            role_id = %role_id,
            user_id = %user_id,
            "removed role from user"
        );

        Ok(())
    }

    /// Lists role assignments in the actor's tenant.
    pub async fn role_assignments(&self, actor: &UserIdentity) -> AppResult<Vec<RoleAssignment>> {
        self.require(actor, PermissionName::AssignUserRole).await?;
        self.role_store.role_assignments(actor.tenant_id()).await
    }
}
