use std::sync::Arc;

use advancely_core::{AppError, AppResult, UserId, UserIdentity};
use advancely_domain::{PermissionName, UserRoleCollection};
use async_trait::async_trait;

/// Repository port for the roles and permissions a user holds.
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// Loads every role the user holds with its permission tokens.
    ///
    /// A user without roles yields an empty collection.
    async fn user_roles(&self, user_id: UserId) -> AppResult<UserRoleCollection>;
}

/// Application service answering "may this user perform this action".
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn AuthorizationRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AuthorizationRepository>) -> Self {
        Self { repository }
    }

    /// Loads the roles and permissions held by a user.
    pub async fn user_roles(&self, user_id: UserId) -> AppResult<UserRoleCollection> {
        self.repository.user_roles(user_id).await
    }

    /// Ensures the session user holds the permission.
    ///
    /// Load failures surface as `Internal`; a missing permission as `Forbidden`.
    pub async fn require_permission(
        &self,
        identity: &UserIdentity,
        permission: PermissionName,
    ) -> AppResult<()> {
        let user_id = identity.user_id();
        let roles = self.user_roles(user_id).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to load roles for user '{user_id}': {error}"
            ))
        })?;

        if roles.has_permission(permission.as_str()) {
            return Ok(());
        }

        tracing::debug!(
            user_id = %user_id,
            tenant_id = %identity.tenant_id(),
            permission = permission.as_str(),
            "permission denied"
        );

        Err(AppError::Forbidden(format!(
            "user '{user_id}' is missing permission '{}'",
            permission.as_str()
        )))
    }
}
