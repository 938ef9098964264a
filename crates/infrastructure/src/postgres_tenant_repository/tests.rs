use std::sync::Arc;

use advancely_application::{AuthorizationService, RoleStore, TenantRepository, TenantService};
use advancely_core::{AppError, UserId, UserIdentity};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::{
    PostgresAuthorizationRepository, PostgresPermissionCatalog, PostgresRoleRepository,
    PostgresUserRoleRepository,
};

use super::PostgresTenantRepository;

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
        panic!("failed to run migrations for postgres tenant tests: {error}");
    }

    Some(pool)
}

fn tenant_service(pool: &PgPool) -> TenantService {
    let authorization =
        AuthorizationService::new(Arc::new(PostgresAuthorizationRepository::new(pool.clone())));
    let role_store = RoleStore::new(
        Arc::new(PostgresRoleRepository::new(pool.clone())),
        Arc::new(PostgresPermissionCatalog::new(pool.clone())),
        Arc::new(PostgresUserRoleRepository::new(pool.clone())),
    );

    TenantService::new(
        Arc::new(PostgresTenantRepository::new(pool.clone())),
        role_store,
        authorization,
    )
}

#[tokio::test]
async fn register_company_twice_converges() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let service = tenant_service(&pool);
    let user_id = UserId::new();

    let first = service.register_company(user_id, "Acme").await;
    let second = service.register_company(user_id, "Acme").await;
    assert!(first.is_ok());
    assert_eq!(
        first.map(|company| company.id).ok(),
        second.map(|company| company.id).ok()
    );

    let counts = sqlx::query_as::<_, (i64, i64, i64)>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM companies WHERE creator_id = $1),
            (SELECT COUNT(*) FROM company_members WHERE user_id = $1),
            (SELECT COUNT(*) FROM security.user_roles WHERE user_id = $1)
        "#,
    )
    .bind(user_id.as_uuid())
    .fetch_one(&pool)
    .await;
    assert_eq!(counts.unwrap_or_default(), (1, 1, 1));
}

#[tokio::test]
async fn duplicate_allowed_domain_is_a_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let service = tenant_service(&pool);
    let user_id = UserId::new();
    let company = service.register_company(user_id, "Globex").await;
    let Ok(company) = company else {
        panic!("company registration failed");
    };
    let admin = UserIdentity::new(user_id, None, company.id);

    assert!(
        service
            .add_allowed_email_domain(&admin, "Globex.com")
            .await
            .is_ok()
    );
    assert!(matches!(
        service.add_allowed_email_domain(&admin, "globex.com").await,
        Err(AppError::Conflict(_))
    ));

    let domains = service.allowed_email_domains(&admin).await.unwrap_or_default();
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].as_str(), "globex.com");
}

#[tokio::test]
async fn members_are_listed_for_the_actor_company_only() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let service = tenant_service(&pool);
    let repository = PostgresTenantRepository::new(pool.clone());
    let admin_id = UserId::new();
    let (Ok(company), Ok(other)) = (
        service.register_company(admin_id, "Initech").await,
        service.register_company(UserId::new(), "Initrode").await,
    ) else {
        panic!("company registration failed");
    };
    let member_id = UserId::new();
    assert!(repository.create_membership(company.id, member_id).await.is_ok());
    assert!(repository.create_membership(other.id, UserId::new()).await.is_ok());

    let admin = UserIdentity::new(admin_id, None, company.id);
    let members = service.members(&admin).await.unwrap_or_default();
    let ids: Vec<UserId> = members.iter().map(|member| member.user_id).collect();

    assert_eq!(ids, vec![admin_id, member_id]);
}
