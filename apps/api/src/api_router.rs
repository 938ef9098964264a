use advancely_core::AppError;
use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/security/roles",
            get(handlers::security::list_roles_handler)
                .post(handlers::security::create_role_handler),
        )
        .route(
            "/api/security/roles/{role_id}",
            get(handlers::security::get_role_handler)
                .put(handlers::security::update_role_handler)
                .delete(handlers::security::delete_role_handler),
        )
        .route(
            "/api/security/roles/{role_id}/permissions/{permission_id}",
            post(handlers::security::assign_role_permission_handler)
                .delete(handlers::security::remove_role_permission_handler),
        )
        .route(
            "/api/security/permissions",
            get(handlers::security::list_permissions_handler),
        )
        .route(
            "/api/security/role-assignments",
            get(handlers::security::list_role_assignments_handler),
        )
        .route(
            "/api/security/users/{user_id}/roles/{role_id}",
            post(handlers::security::assign_user_role_handler)
                .delete(handlers::security::remove_user_role_handler),
        )
        .route(
            "/api/security/me/roles",
            get(handlers::security::current_user_roles_handler),
        )
        .route("/api/company", get(handlers::company::company_handler))
        .route(
            "/api/company/members",
            get(handlers::company::list_company_members_handler),
        )
        .route(
            "/api/company/allowed-email-domains",
            get(handlers::company::list_allowed_email_domains_handler)
                .post(handlers::company::add_allowed_email_domain_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/auth/me", get(auth::me_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}
