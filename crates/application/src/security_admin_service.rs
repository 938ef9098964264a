use advancely_core::{AppResult, UserIdentity};
use advancely_domain::PermissionName;

use crate::{AuthorizationService, RoleStore};

mod roles;
mod user_roles;

/// Session-facing security administration over the role store.
///
/// Every call takes the acting session identity, checks the permission the
/// operation requires, and acts within the identity's tenant.
#[derive(Clone)]
pub struct SecurityAdminService {
    authorization_service: AuthorizationService,
    role_store: RoleStore,
}

impl SecurityAdminService {
    /// Creates a security admin service.
    #[must_use]
    pub fn new(authorization_service: AuthorizationService, role_store: RoleStore) -> Self {
        Self {
            authorization_service,
            role_store,
        }
    }

    async fn require(&self, actor: &UserIdentity, permission: PermissionName) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor, permission)
            .await
    }
}

#[cfg(test)]
mod tests;
