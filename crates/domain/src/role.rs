use advancely_core::{AppError, AppResult, NonEmptyString, RoleId, TenantId};
use serde::{Deserialize, Serialize};

use crate::Permission;

/// Maximum stored length of a role name.
const ROLE_NAME_MAX_LENGTH: usize = 100;

/// Built-in roles shared by every tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemRole {
    /// Company administrator; bypasses every permission check.
    Admin,
}

impl SystemRole {
    /// Returns the stored role name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
        }
    }

    /// Returns all built-in roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Admin]
    }

    /// Returns whether a name collides with a built-in role, ignoring case.
    #[must_use]
    pub fn is_reserved_name(name: &str) -> bool {
        let name = name.trim();
        Self::all()
            .iter()
            .any(|role| role.as_str().eq_ignore_ascii_case(name))
    }
}

/// Role definition, either tenant-owned (custom) or global (system).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    id: RoleId,
    tenant_id: Option<TenantId>,
    name: String,
    description: String,
    is_system: bool,
}

impl Role {
    /// Creates a role, enforcing that system roles are global and custom roles are tenant-owned.
    pub fn new(
        id: RoleId,
        tenant_id: Option<TenantId>,
        name: impl Into<String>,
        description: impl Into<String>,
        is_system: bool,
    ) -> AppResult<Self> {
        match (is_system, tenant_id) {
            (true, Some(tenant_id)) => {
                return Err(AppError::Validation(format!(
                    "system role {id} must not belong to tenant '{tenant_id}'"
                )));
            }
            (false, None) => {
                return Err(AppError::Validation(format!(
                    "custom role {id} must belong to a tenant"
                )));
            }
            _ => {}
        }

        Ok(Self {
            id,
            tenant_id,
            name: name.into(),
            description: description.into(),
            is_system,
        })
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the owning tenant; `None` for system roles.
    #[must_use]
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the role description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns whether the role is a global system role.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Returns whether a lookup scoped to `tenant_id` may see this role.
    ///
    /// System roles are visible to everyone. Custom roles are only visible to
    /// their owning tenant, so a lookup without a tenant sees system roles only.
    #[must_use]
    pub fn is_visible_to(&self, tenant_id: Option<TenantId>) -> bool {
        self.is_system || (tenant_id.is_some() && self.tenant_id == tenant_id)
    }

    /// Returns a copy with replaced name and description.
    #[must_use]
    pub fn with_details(&self, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..self.clone()
        }
    }
}

/// Role joined with its permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleWithPermissions {
    /// Role row.
    pub role: Role,
    /// Associated permissions ordered by id; empty when none.
    pub permissions: Vec<Permission>,
}

/// Validates a name for a tenant-owned role.
pub fn validate_custom_role_name(name: &str) -> AppResult<NonEmptyString> {
    let name = NonEmptyString::new(name.trim())
        .map_err(|_| AppError::Validation("role name must not be empty".to_owned()))?;

    if name.as_str().chars().count() > ROLE_NAME_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "role name must be at most {ROLE_NAME_MAX_LENGTH} characters"
        )));
    }

    if SystemRole::is_reserved_name(name.as_str()) {
        return Err(AppError::Validation(format!(
            "role name '{}' is reserved for a system role",
            name.as_str()
        )));
    }

    Ok(name)
}
