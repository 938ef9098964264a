use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use advancely_application::PermissionCatalog;
use advancely_core::{AppError, AppResult, PermissionId};
use advancely_domain::{Permission, PermissionGroup};

/// PostgreSQL-backed read-only permission catalog.
#[derive(Clone)]
pub struct PostgresPermissionCatalog {
    pool: PgPool,
}

impl PostgresPermissionCatalog {
    /// Creates a catalog with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    permission_id: i32,
    permission_name: String,
    permission_description: String,
    group_id: i32,
    group_name: String,
    group_description: String,
}

impl From<PermissionRow> for Permission {
    fn from(row: PermissionRow) -> Self {
        Self {
            id: PermissionId::new(row.permission_id),
            name: row.permission_name,
            description: row.permission_description,
            group: PermissionGroup {
                id: row.group_id,
                name: row.group_name,
                description: row.group_description,
            },
        }
    }
}

#[async_trait]
impl PermissionCatalog for PostgresPermissionCatalog {
    async fn find_permission(&self, permission_id: PermissionId) -> AppResult<Option<Permission>> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT
                permissions.id AS permission_id,
                permissions.name AS permission_name,
                permissions.description AS permission_description,
                permission_groups.id AS group_id,
                permission_groups.name AS group_name,
                permission_groups.description AS group_description
            FROM security.permissions AS permissions
            INNER JOIN security.permission_groups AS permission_groups
                ON permission_groups.id = permissions.group_id
            WHERE permissions.id = $1
            "#,
        )
        .bind(permission_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find permission: {error}")))?;

        Ok(row.map(Permission::from))
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT
                permissions.id AS permission_id,
                permissions.name AS permission_name,
                permissions.description AS permission_description,
                permission_groups.id AS group_id,
                permission_groups.name AS group_name,
                permission_groups.description AS group_description
            FROM security.permissions AS permissions
            INNER JOIN security.permission_groups AS permission_groups
                ON permission_groups.id = permissions.group_id
            ORDER BY permission_groups.id, permissions.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list permissions: {error}")))?;

        Ok(rows.into_iter().map(Permission::from).collect())
    }
}
