use advancely_core::{AppError, AppResult, RoleId, TenantId, UserId};
use advancely_domain::SystemRole;

use crate::security_ports::RoleAssignment;

use super::{RoleStore, ignore_duplicate};

impl RoleStore {
    /// Assigns a role visible to the tenant to a member of the tenant.
    /// Assigning twice succeeds.
    pub async fn assign_role_to_user(
        &self,
        role_id: RoleId,
        user_id: UserId,
        tenant_id: TenantId,
    ) -> AppResult<()> {
        self.role(role_id, Some(tenant_id)).await?;

        let inserted = ignore_duplicate(
            self.user_roles
                .insert_user_role(tenant_id, role_id, user_id)
                .await,
        )?;
        if !inserted {
            // The role may have been deleted since the check; otherwise the
            // user is not a member of the tenant.
            self.role(role_id, Some(tenant_id)).await?;
            return Err(AppError::NotFound(format!(
                "user '{user_id}' is not a member of company '{tenant_id}'"
            )));
        }

        Ok(())
    }

    /// Assigns a built-in role, resolved by name, to a user.
    pub async fn assign_system_role_to_user(
        &self,
        role: SystemRole,
        user_id: UserId,
        tenant_id: TenantId,
    ) -> AppResult<()> {
        let system_role = self
            .roles
            .find_system_role(role)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("system role '{}' does not exist", role.as_str()))
            })?;

        self.assign_role_to_user(system_role.id(), user_id, tenant_id)
            .await
    }

    /// Removes a role from a user. Removing an absent assignment succeeds.
    pub async fn remove_role_from_user(
        &self,
        role_id: RoleId,
        user_id: UserId,
        tenant_id: TenantId,
    ) -> AppResult<()> {
        self.role(role_id, Some(tenant_id)).await?;

        self.user_roles
            .delete_user_role(tenant_id, role_id, user_id)
            .await
    }

    /// Lists role assignments held by members of the tenant.
    pub async fn role_assignments(&self, tenant_id: TenantId) -> AppResult<Vec<RoleAssignment>> {
        self.user_roles.list_role_assignments(tenant_id).await
    }
}
