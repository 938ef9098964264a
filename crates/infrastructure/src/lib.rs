//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_security_repository;
mod postgres_authorization_repository;
mod postgres_errors;
mod postgres_permission_catalog;
mod postgres_role_repository;
mod postgres_tenant_repository;
mod postgres_user_role_repository;

pub use in_memory_security_repository::InMemorySecurityRepository;
pub use postgres_authorization_repository::PostgresAuthorizationRepository;
pub use postgres_permission_catalog::PostgresPermissionCatalog;
pub use postgres_role_repository::PostgresRoleRepository;
pub use postgres_tenant_repository::PostgresTenantRepository;
pub use postgres_user_role_repository::PostgresUserRoleRepository;
