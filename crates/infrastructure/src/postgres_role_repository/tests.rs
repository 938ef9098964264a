use std::sync::Arc;

use advancely_application::{AuthorizationService, RoleStore, RoleUpdate, TenantRepository};
use advancely_core::{AppError, PermissionId, RoleId, TenantId, UserId};
use advancely_domain::SystemRole;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::{
    PostgresAuthorizationRepository, PostgresPermissionCatalog, PostgresTenantRepository,
    PostgresUserRoleRepository,
};

use super::PostgresRoleRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres role tests: {error}");
    }

    Some(pool)
}

fn role_store(pool: &PgPool) -> RoleStore {
    RoleStore::new(
        Arc::new(PostgresRoleRepository::new(pool.clone())),
        Arc::new(PostgresPermissionCatalog::new(pool.clone())),
        Arc::new(PostgresUserRoleRepository::new(pool.clone())),
    )
}

async fn create_tenant(pool: &PgPool) -> TenantId {
    let company = PostgresTenantRepository::new(pool.clone())
        .create_company(UserId::new(), "Role Tenant")
        .await;
    assert!(company.is_ok());

    company
        .map(|company| company.id)
        .unwrap_or_else(|_| unreachable!())
}

async fn create_member(pool: &PgPool, tenant_id: TenantId) -> UserId {
    let user_id = UserId::new();
    let membership = PostgresTenantRepository::new(pool.clone())
        .create_membership(tenant_id, user_id)
        .await;
    assert!(membership.is_ok());

    user_id
}

async fn permission_id(pool: &PgPool, name: &str) -> PermissionId {
    let id = sqlx::query_scalar::<_, i32>("SELECT id FROM security.permissions WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await;
    assert!(id.is_ok());

    PermissionId::new(id.unwrap_or_default())
}

async fn admin_role_id(store: &RoleStore) -> RoleId {
    let roles = store.roles(TenantId::new()).await.unwrap_or_default();
    roles
        .iter()
        .find(|role| role.role.is_system() && role.role.name() == SystemRole::Admin.as_str())
        .map(|role| role.role.id())
        .unwrap_or_else(|| unreachable!())
}

#[tokio::test]
async fn support_scenario_grants_only_assigned_permission() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = role_store(&pool);
    let authorization =
        AuthorizationService::new(Arc::new(PostgresAuthorizationRepository::new(pool.clone())));
    let tenant_id = create_tenant(&pool).await;
    let user_id = create_member(&pool, tenant_id).await;

    let role = store
        .create_role(tenant_id, "Support", "support staff")
        .await;
    assert!(role.is_ok());
    let role_id = role.map(|role| role.id()).unwrap_or_else(|_| unreachable!());

    let fetched = store.role(role_id, Some(tenant_id)).await;
    assert!(
        fetched
            .as_ref()
            .map(|role| role.permissions.is_empty() && role.role.description() == "support staff")
            .unwrap_or_default()
    );

    let edit_user = permission_id(&pool, "edit-user").await;
    assert!(
        store
            .assign_permission_to_role(role_id, edit_user, tenant_id)
            .await
            .is_ok()
    );
    assert!(
        store
            .assign_role_to_user(role_id, user_id, tenant_id)
            .await
            .is_ok()
    );

    let roles = authorization.user_roles(user_id).await;
    assert!(roles.is_ok());
    let roles = roles.unwrap_or_else(|_| unreachable!());
    assert_eq!(roles.roles.len(), 1);
    assert_eq!(roles.roles[0].name, "Support");
    assert_eq!(roles.roles[0].permissions, vec!["edit-user".to_owned()]);
    assert!(roles.has_permission("edit-user"));
    assert!(!roles.has_permission("delete-user"));
}

#[tokio::test]
async fn custom_roles_are_invisible_to_other_tenants() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = role_store(&pool);
    let owner = create_tenant(&pool).await;
    let other = create_tenant(&pool).await;

    let role = store.create_role(owner, "Auditors", "").await;
    let role_id = role.map(|role| role.id()).unwrap_or_else(|_| unreachable!());

    assert!(matches!(
        store.role(role_id, Some(other)).await,
        Err(AppError::RoleNotFound(_))
    ));
    let listed = store.roles(other).await.unwrap_or_default();
    assert!(listed.iter().all(|role| role.role.id() != role_id));
    assert!(matches!(
        store.delete_role(role_id, other).await,
        Err(AppError::RoleNotFound(_))
    ));
    assert!(matches!(
        store
            .update_role(RoleUpdate {
                role_id,
                tenant_id: other,
                name: "Hijacked".to_owned(),
                description: String::new(),
            })
            .await,
        Err(AppError::RoleNotFound(_))
    ));
    assert!(store.role(role_id, Some(owner)).await.is_ok());
}

#[tokio::test]
async fn system_role_rejects_every_mutation() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = role_store(&pool);
    let tenant_id = create_tenant(&pool).await;
    let admin_id = admin_role_id(&store).await;
    let edit_user = permission_id(&pool, "edit-user").await;

    let before = store.role(admin_id, None).await.ok();

    let results = [
        store
            .update_role(RoleUpdate {
                role_id: admin_id,
                tenant_id,
                name: "Owner".to_owned(),
                description: String::new(),
            })
            .await
            .map(|_| ()),
        store.delete_role(admin_id, tenant_id).await,
        store
            .assign_permission_to_role(admin_id, edit_user, tenant_id)
            .await,
        store
            .remove_permission_from_role(admin_id, edit_user, tenant_id)
            .await,
    ];

    for result in results {
        assert!(result.err().is_some_and(|error| error.is_system_role_violation()));
    }
    assert_eq!(store.role(admin_id, None).await.ok(), before);
}

#[tokio::test]
async fn repeated_association_inserts_store_one_row() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = role_store(&pool);
    let tenant_id = create_tenant(&pool).await;
    let user_id = create_member(&pool, tenant_id).await;
    let role_id = store
        .create_role(tenant_id, "Editors", "")
        .await
        .map(|role| role.id())
        .unwrap_or_else(|_| unreachable!());
    let edit_user = permission_id(&pool, "edit-user").await;

    for _ in 0..2 {
        assert!(
            store
                .assign_permission_to_role(role_id, edit_user, tenant_id)
                .await
                .is_ok()
        );
        assert!(
            store
                .assign_role_to_user(role_id, user_id, tenant_id)
                .await
                .is_ok()
        );
    }

    let role = store.role(role_id, Some(tenant_id)).await;
    assert_eq!(role.map(|role| role.permissions.len()).unwrap_or_default(), 1);

    let user_rows = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM security.user_roles WHERE user_id = $1",
    )
    .bind(user_id.as_uuid())
    .fetch_one(&pool)
    .await;
    assert_eq!(user_rows.unwrap_or_default(), 1);
}

#[tokio::test]
async fn duplicate_role_name_in_tenant_is_a_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = role_store(&pool);
    let tenant_id = create_tenant(&pool).await;
    let other = create_tenant(&pool).await;

    assert!(store.create_role(tenant_id, "Billing", "").await.is_ok());
    assert!(matches!(
        store.create_role(tenant_id, "billing", "").await,
        Err(AppError::Conflict(_))
    ));
    assert!(store.create_role(other, "Billing", "").await.is_ok());
}

#[tokio::test]
async fn deleting_role_cascades_assignments() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = role_store(&pool);
    let authorization =
        AuthorizationService::new(Arc::new(PostgresAuthorizationRepository::new(pool.clone())));
    let tenant_id = create_tenant(&pool).await;
    let user_id = create_member(&pool, tenant_id).await;
    let role_id = store
        .create_role(tenant_id, "Temporary", "")
        .await
        .map(|role| role.id())
        .unwrap_or_else(|_| unreachable!());

    assert!(
        store
            .assign_role_to_user(role_id, user_id, tenant_id)
            .await
            .is_ok()
    );
    assert!(store.delete_role(role_id, tenant_id).await.is_ok());

    let roles = authorization.user_roles(user_id).await;
    assert!(roles.map(|roles| roles.is_empty()).unwrap_or_default());
}

#[tokio::test]
async fn roles_cannot_be_assigned_to_members_of_other_companies() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = role_store(&pool);
    let authorization =
        AuthorizationService::new(Arc::new(PostgresAuthorizationRepository::new(pool.clone())));
    let company_a = create_tenant(&pool).await;
    let company_b = create_tenant(&pool).await;
    let b_user = create_member(&pool, company_b).await;
    let role_id = store
        .create_role(company_a, "Deleter", "")
        .await
        .map(|role| role.id())
        .unwrap_or_else(|_| unreachable!());
    let delete_user = permission_id(&pool, "delete-user").await;
    assert!(
        store
            .assign_permission_to_role(role_id, delete_user, company_a)
            .await
            .is_ok()
    );

    assert!(matches!(
        store.assign_role_to_user(role_id, b_user, company_a).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        store
            .assign_system_role_to_user(SystemRole::Admin, b_user, company_a)
            .await,
        Err(AppError::NotFound(_))
    ));

    let roles = authorization.user_roles(b_user).await;
    assert!(roles.map(|roles| roles.is_empty()).unwrap_or_default());
}
