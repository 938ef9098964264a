use serde::{Deserialize, Serialize};

use crate::{TenantId, UserId};

/// Authenticated identity persisted in the session and passed to every service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: UserId,
    email: Option<String>,
    tenant_id: TenantId,
}

impl UserIdentity {
    /// Creates a user identity from authentication and tenancy data.
    #[must_use]
    pub fn new(user_id: UserId, email: Option<String>, tenant_id: TenantId) -> Self {
        Self {
            user_id,
            email,
            tenant_id,
        }
    }

    /// Returns the identity provider's user identifier.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the company the user is acting in.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}
