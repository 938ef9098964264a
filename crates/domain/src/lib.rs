//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod company;
mod role;
mod security;
mod user_roles;

pub use company::EmailDomain;
pub use role::{Role, RoleWithPermissions, SystemRole, validate_custom_role_name};
pub use security::{Permission, PermissionGroup, PermissionGroupName, PermissionName};
pub use user_roles::{UserRole, UserRoleCollection};
