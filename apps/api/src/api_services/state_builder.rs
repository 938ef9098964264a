use std::sync::Arc;

use advancely_application::{AuthorizationService, RoleStore, SecurityAdminService, TenantService};
use advancely_infrastructure::{
    PostgresAuthorizationRepository, PostgresPermissionCatalog, PostgresRoleRepository,
    PostgresTenantRepository, PostgresUserRoleRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> AppState {
    let authorization_service = AuthorizationService::new(Arc::new(
        PostgresAuthorizationRepository::new(pool.clone()),
    ));
    let role_store = RoleStore::new(
        Arc::new(PostgresRoleRepository::new(pool.clone())),
        Arc::new(PostgresPermissionCatalog::new(pool.clone())),
        Arc::new(PostgresUserRoleRepository::new(pool.clone())),
    );
    let tenant_service = TenantService::new(
        Arc::new(PostgresTenantRepository::new(pool)),
        role_store.clone(),
        authorization_service.clone(),
    );

    AppState {
        security_admin_service: SecurityAdminService::new(authorization_service, role_store),
        tenant_service,
        frontend_url: config.frontend_url.clone(),
        bootstrap_token: config.bootstrap_token.clone(),
    }
}
