//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod role_store;
mod security_admin_service;
mod security_ports;
mod tenant_ports;
mod tenant_service;

pub use authorization_service::{AuthorizationRepository, AuthorizationService};
pub use role_store::RoleStore;
pub use security_admin_service::SecurityAdminService;
pub use security_ports::{
    CreateRoleInput, PermissionCatalog, RoleAssignment, RoleRepository, RoleUpdate,
    UserRoleRepository,
};
pub use tenant_ports::{Company, CompanyMember, TenantRepository};
pub use tenant_service::TenantService;
