mod repositories;
mod roles;

pub use repositories::{PermissionCatalog, RoleRepository, UserRoleRepository};
pub use roles::{CreateRoleInput, RoleAssignment, RoleUpdate};
