//! Shared primitives for all Rust crates in Advancely.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;
mod ids;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::UserIdentity;
pub use ids::{PermissionId, RoleId, TenantId, UserId};

/// Result type used across Advancely crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Role does not exist or is not visible to the tenant.
    #[error("role not found: {0}")]
    RoleNotFound(RoleId),

    /// Permission does not exist in the catalog.
    #[error("permission not found: {0}")]
    PermissionNotFound(PermissionId),

    /// Attempted to change a system role or its permission set.
    #[error("cannot update system role {0}")]
    CannotUpdateSystemRole(RoleId),

    /// Attempted to delete a system role.
    #[error("cannot delete system role {0}")]
    CannotDeleteSystemRole(RoleId),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns whether the error rejects a mutation of a system role.
    #[must_use]
    pub fn is_system_role_violation(&self) -> bool {
        matches!(
            self,
            Self::CannotUpdateSystemRole(_) | Self::CannotDeleteSystemRole(_)
        )
    }

    /// Returns whether the error reports a uniqueness conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString, RoleId};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn system_role_errors_share_one_kind() {
        assert!(AppError::CannotUpdateSystemRole(RoleId::new(1)).is_system_role_violation());
        assert!(AppError::CannotDeleteSystemRole(RoleId::new(1)).is_system_role_violation());
        assert!(!AppError::RoleNotFound(RoleId::new(1)).is_system_role_violation());
    }

    #[test]
    fn role_errors_mention_the_role_id() {
        let message = AppError::CannotDeleteSystemRole(RoleId::new(7)).to_string();
        assert_eq!(message, "cannot delete system role 7");
    }
}
