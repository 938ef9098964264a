use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use advancely_application::AuthorizationRepository;
use advancely_core::{AppError, AppResult, UserId};
use advancely_domain::{UserRole, UserRoleCollection};

/// PostgreSQL-backed repository resolving the roles a user holds in their company.
#[derive(Clone)]
pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRoleRow {
    role_id: i32,
    role_name: String,
    is_system_role: bool,
    permission_name: Option<String>,
}

#[async_trait]
impl AuthorizationRepository for PostgresAuthorizationRepository {
    async fn user_roles(&self, user_id: UserId) -> AppResult<UserRoleCollection> {
        let rows = sqlx::query_as::<_, UserRoleRow>(
            r#"
            SELECT
                roles.id AS role_id,
                roles.name AS role_name,
                roles.is_system_role,
                permissions.name AS permission_name
            FROM security.user_roles AS user_roles
            INNER JOIN company_members AS members
                ON members.user_id = user_roles.user_id
            INNER JOIN security.roles AS roles
                ON roles.id = user_roles.role_id
                AND (roles.company_id = members.company_id OR roles.is_system_role)
            LEFT JOIN security.role_permissions AS role_permissions
                ON role_permissions.role_id = roles.id
            LEFT JOIN security.permissions AS permissions
                ON permissions.id = role_permissions.permission_id
            WHERE user_roles.user_id = $1
            ORDER BY roles.id, permissions.id
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load user roles: {error}")))?;

        let mut collection = UserRoleCollection::empty(user_id);
        let mut current_role_id = None;

        for row in rows {
            if current_role_id != Some(row.role_id) {
                current_role_id = Some(row.role_id);
                collection.roles.push(UserRole {
                    name: row.role_name,
                    is_system: row.is_system_role,
                    permissions: Vec::new(),
                });
            }

            if let (Some(role), Some(permission_name)) =
                (collection.roles.last_mut(), row.permission_name)
            {
                role.permissions.push(permission_name);
            }
        }

        Ok(collection)
    }
}
