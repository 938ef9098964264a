use advancely_application::{SecurityAdminService, TenantService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub security_admin_service: SecurityAdminService,
    pub tenant_service: TenantService,
    pub frontend_url: String,
    pub bootstrap_token: String,
}
