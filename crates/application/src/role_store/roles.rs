use advancely_core::{AppError, AppResult, RoleId, TenantId};
use advancely_domain::{Role, RoleWithPermissions, validate_custom_role_name};

use crate::security_ports::{CreateRoleInput, RoleUpdate};

use super::RoleStore;

impl RoleStore {
    /// Returns a role visible to the tenant with its permissions.
    ///
    /// `None` restricts the lookup to system roles.
    pub async fn role(
        &self,
        role_id: RoleId,
        tenant_id: Option<TenantId>,
    ) -> AppResult<RoleWithPermissions> {
        self.roles
            .find_role(role_id, tenant_id)
            .await?
            .ok_or(AppError::RoleNotFound(role_id))
    }

    /// Lists the tenant's own roles and every system role.
    pub async fn roles(&self, tenant_id: TenantId) -> AppResult<Vec<RoleWithPermissions>> {
        self.roles.list_roles(tenant_id).await
    }

    /// Creates a custom role owned by the tenant.
    pub async fn create_role(
        &self,
        tenant_id: TenantId,
        name: &str,
        description: &str,
    ) -> AppResult<Role> {
        let name = validate_custom_role_name(name)?;

        self.roles
            .create_role(
                tenant_id,
                CreateRoleInput {
                    name: name.into(),
                    description: description.to_owned(),
                },
            )
            .await
    }

    /// Rewrites the name and description of a custom role.
    pub async fn update_role(&self, update: RoleUpdate) -> AppResult<Role> {
        let role_id = update.role_id;
        self.mutable_role(role_id, update.tenant_id).await?;
        let name = validate_custom_role_name(&update.name)?;

        self.roles
            .update_custom_role(RoleUpdate {
                name: name.into(),
                ..update
            })
            .await?
            .ok_or(AppError::RoleNotFound(role_id))
    }

    /// Deletes a custom role together with its associations.
    pub async fn delete_role(&self, role_id: RoleId, tenant_id: TenantId) -> AppResult<()> {
        let role = self.role(role_id, Some(tenant_id)).await?;
        if role.role.is_system() {
            return Err(AppError::CannotDeleteSystemRole(role_id));
        }

        if self.roles.delete_custom_role(tenant_id, role_id).await? {
            Ok(())
        } else {
            Err(AppError::RoleNotFound(role_id))
        }
    }
}
