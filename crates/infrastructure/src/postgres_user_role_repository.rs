use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use advancely_application::{RoleAssignment, UserRoleRepository};
use advancely_core::{AppError, AppResult, RoleId, TenantId, UserId};

use crate::postgres_errors::map_conflict;

/// PostgreSQL-backed repository for user-role associations.
///
/// Only members of a company can be assigned its roles. Custom roles scope
/// their assignments to the owning company; system role assignments are
/// scoped through the user's company membership.
#[derive(Clone)]
pub struct PostgresUserRoleRepository {
    pool: PgPool,
}

impl PostgresUserRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleAssignmentRow {
    user_id: Uuid,
    role_id: i32,
    role_name: String,
    is_system_role: bool,
    assigned_at: DateTime<Utc>,
}

#[async_trait]
impl UserRoleRepository for PostgresUserRoleRepository {
    async fn insert_user_role(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        user_id: UserId,
    ) -> AppResult<bool> {
        let rows_affected = sqlx::query(
            r#"
            INSERT INTO security.user_roles (user_id, role_id)
            SELECT $3, roles.id
            FROM security.roles AS roles
            WHERE roles.id = $1
                AND (roles.company_id = $2 OR roles.is_system_role)
                AND EXISTS (
                    SELECT 1
                    FROM company_members AS members
                    WHERE members.user_id = $3
                        AND members.company_id = $2
                )
            "#,
        )
        .bind(role_id.as_i32())
        .bind(tenant_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            map_conflict(
                error,
                "assign role to user",
                format!("role {role_id} is already assigned to user '{user_id}'"),
            )
        })?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn delete_user_role(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        user_id: UserId,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM security.user_roles AS user_roles
            USING security.roles AS roles
            WHERE user_roles.role_id = roles.id
                AND user_roles.role_id = $1
                AND user_roles.user_id = $3
                AND (
                    roles.company_id = $2
                    OR (
                        roles.is_system_role
                        AND EXISTS (
                            SELECT 1
                            FROM company_members AS members
                            WHERE members.user_id = user_roles.user_id
                                AND members.company_id = $2
                        )
                    )
                )
            "#,
        )
        .bind(role_id.as_i32())
        .bind(tenant_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to remove role from user: {error}"))
        })?;

        Ok(())
    }

    async fn list_role_assignments(&self, tenant_id: TenantId) -> AppResult<Vec<RoleAssignment>> {
        let rows = sqlx::query_as::<_, RoleAssignmentRow>(
            r#"
            SELECT
                user_roles.user_id,
                user_roles.role_id,
                roles.name AS role_name,
                roles.is_system_role,
                user_roles.created_at AS assigned_at
            FROM security.user_roles AS user_roles
            INNER JOIN security.roles AS roles
                ON roles.id = user_roles.role_id
            LEFT JOIN company_members AS members
                ON members.user_id = user_roles.user_id
            WHERE roles.company_id = $1
                OR (roles.is_system_role AND members.company_id = $1)
            ORDER BY user_roles.created_at, user_roles.role_id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list role assignments: {error}"))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| RoleAssignment {
                user_id: UserId::from_uuid(row.user_id),
                role_id: RoleId::new(row.role_id),
                role_name: row.role_name,
                is_system: row.is_system_role,
                assigned_at: row.assigned_at,
            })
            .collect())
    }
}
