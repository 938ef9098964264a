use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use advancely_application::{CreateRoleInput, RoleRepository, RoleUpdate};
use advancely_core::{AppError, AppResult, PermissionId, RoleId, TenantId};
use advancely_domain::{Permission, PermissionGroup, Role, RoleWithPermissions, SystemRole};

use crate::postgres_errors::{is_foreign_key_violation, is_unique_violation, map_conflict};

/// PostgreSQL-backed repository for role definitions.
#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    role_id: i32,
    company_id: Option<Uuid>,
    role_name: String,
    role_description: String,
    is_system_role: bool,
}

impl RoleRow {
    fn into_role(self) -> AppResult<Role> {
        Role::new(
            RoleId::new(self.role_id),
            self.company_id.map(TenantId::from_uuid),
            self.role_name,
            self.role_description,
            self.is_system_role,
        )
    }
}

#[derive(Debug, FromRow)]
struct RolePermissionRow {
    #[sqlx(flatten)]
    role: RoleRow,
    permission_id: Option<i32>,
    permission_name: Option<String>,
    permission_description: Option<String>,
    group_id: Option<i32>,
    group_name: Option<String>,
    group_description: Option<String>,
}

impl RolePermissionRow {
    fn take_permission(&mut self) -> Option<Permission> {
        Some(Permission {
            id: PermissionId::new(self.permission_id?),
            name: self.permission_name.take()?,
            description: self.permission_description.take().unwrap_or_default(),
            group: PermissionGroup {
                id: self.group_id?,
                name: self.group_name.take().unwrap_or_default(),
                description: self.group_description.take().unwrap_or_default(),
            },
        })
    }
}

/// Folds rows ordered by role then permission into one entry per role.
fn aggregate_roles(rows: Vec<RolePermissionRow>) -> AppResult<Vec<RoleWithPermissions>> {
    let mut roles: Vec<RoleWithPermissions> = Vec::new();

    for mut row in rows {
        let permission = row.take_permission();
        let role_id = RoleId::new(row.role.role_id);

        match roles.last_mut() {
            Some(current) if current.role.id() == role_id => {
                current.permissions.extend(permission);
            }
            _ => roles.push(RoleWithPermissions {
                role: row.role.into_role()?,
                permissions: permission.into_iter().collect(),
            }),
        }
    }

    Ok(roles)
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_role(
        &self,
        role_id: RoleId,
        tenant_id: Option<TenantId>,
    ) -> AppResult<Option<RoleWithPermissions>> {
        let rows = sqlx::query_as::<_, RolePermissionRow>(
            r#"
            SELECT
                roles.id AS role_id,
                roles.company_id,
                roles.name AS role_name,
                roles.description AS role_description,
                roles.is_system_role,
                permissions.id AS permission_id,
                permissions.name AS permission_name,
                permissions.description AS permission_description,
                permission_groups.id AS group_id,
                permission_groups.name AS group_name,
                permission_groups.description AS group_description
            FROM security.roles AS roles
            LEFT JOIN security.role_permissions AS role_permissions
                ON role_permissions.role_id = roles.id
            LEFT JOIN security.permissions AS permissions
                ON permissions.id = role_permissions.permission_id
            LEFT JOIN security.permission_groups AS permission_groups
                ON permission_groups.id = permissions.group_id
            WHERE roles.id = $1
                AND (roles.company_id = $2 OR roles.is_system_role)
            ORDER BY permissions.id
            "#,
        )
        .bind(role_id.as_i32())
        .bind(tenant_id.map(|tenant_id| tenant_id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find role: {error}")))?;

        Ok(aggregate_roles(rows)?.into_iter().next())
    }

    async fn find_system_role(&self, role: SystemRole) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT
                id AS role_id,
                company_id,
                name AS role_name,
                description AS role_description,
                is_system_role
            FROM security.roles
            WHERE is_system_role AND name = $1
            "#,
        )
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find system role: {error}")))?
        .map(RoleRow::into_role)
        .transpose()
    }

    async fn list_roles(&self, tenant_id: TenantId) -> AppResult<Vec<RoleWithPermissions>> {
        let rows = sqlx::query_as::<_, RolePermissionRow>(
            r#"
            SELECT
                roles.id AS role_id,
                roles.company_id,
                roles.name AS role_name,
                roles.description AS role_description,
                roles.is_system_role,
                permissions.id AS permission_id,
                permissions.name AS permission_name,
                permissions.description AS permission_description,
                permission_groups.id AS group_id,
                permission_groups.name AS group_name,
                permission_groups.description AS group_description
            FROM security.roles AS roles
            LEFT JOIN security.role_permissions AS role_permissions
                ON role_permissions.role_id = roles.id
            LEFT JOIN security.permissions AS permissions
                ON permissions.id = role_permissions.permission_id
            LEFT JOIN security.permission_groups AS permission_groups
                ON permission_groups.id = permissions.group_id
            WHERE roles.company_id = $1 OR roles.is_system_role
            ORDER BY roles.id, permissions.id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?;

        aggregate_roles(rows)
    }

    async fn create_role(&self, tenant_id: TenantId, input: CreateRoleInput) -> AppResult<Role> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO security.roles (company_id, name, description, is_system_role)
            VALUES ($1, $2, $3, false)
            RETURNING
                id AS role_id,
                company_id,
                name AS role_name,
                description AS role_description,
                is_system_role
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(input.name.as_str())
        .bind(input.description.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            map_conflict(
                error,
                "create role",
                format!("role '{}' already exists", input.name),
            )
        })?
        .into_role()
    }

    async fn update_custom_role(&self, update: RoleUpdate) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            UPDATE security.roles
            SET name = $3, description = $4
            WHERE id = $1
                AND company_id = $2
                AND NOT is_system_role
            RETURNING
                id AS role_id,
                company_id,
                name AS role_name,
                description AS role_description,
                is_system_role
            "#,
        )
        .bind(update.role_id.as_i32())
        .bind(update.tenant_id.as_uuid())
        .bind(update.name.as_str())
        .bind(update.description.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            map_conflict(
                error,
                "update role",
                format!("role '{}' already exists", update.name),
            )
        })?
        .map(RoleRow::into_role)
        .transpose()
    }

    async fn delete_custom_role(&self, tenant_id: TenantId, role_id: RoleId) -> AppResult<bool> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM security.roles
            WHERE id = $1
                AND company_id = $2
                AND NOT is_system_role
            "#,
        )
        .bind(role_id.as_i32())
        .bind(tenant_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete role: {error}")))?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn insert_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        let rows_affected = sqlx::query(
            r#"
            INSERT INTO security.role_permissions (role_id, permission_id)
            SELECT roles.id, $3
            FROM security.roles AS roles
            WHERE roles.id = $1
                AND roles.company_id = $2
                AND NOT roles.is_system_role
            "#,
        )
        .bind(role_id.as_i32())
        .bind(tenant_id.as_uuid())
        .bind(permission_id.as_i32())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                AppError::Conflict(format!(
                    "permission {permission_id} is already assigned to role {role_id}"
                ))
            } else if is_foreign_key_violation(&error) {
                AppError::PermissionNotFound(permission_id)
            } else {
                AppError::Internal(format!("failed to assign permission to role: {error}"))
            }
        })?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn delete_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM security.role_permissions AS role_permissions
            USING security.roles AS roles
            WHERE role_permissions.role_id = roles.id
                AND role_permissions.role_id = $1
                AND role_permissions.permission_id = $3
                AND roles.company_id = $2
                AND NOT roles.is_system_role
            "#,
        )
        .bind(role_id.as_i32())
        .bind(tenant_id.as_uuid())
        .bind(permission_id.as_i32())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to remove permission from role: {error}"))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests;
