use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use advancely_application::{Company, CompanyMember, TenantRepository};
use advancely_core::{AppError, AppResult, TenantId, UserId};
use advancely_domain::EmailDomain;

use crate::postgres_errors::map_conflict;

/// PostgreSQL-backed repository for companies and memberships.
#[derive(Clone)]
pub struct PostgresTenantRepository {
    pool: PgPool,
}

impl PostgresTenantRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CompanyRow {
    id: Uuid,
    name: String,
    creator_id: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct CompanyMemberRow {
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: TenantId::from_uuid(row.id),
            name: row.name,
            creator_id: UserId::from_uuid(row.creator_id),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl TenantRepository for PostgresTenantRepository {
    async fn find_company(&self, tenant_id: TenantId) -> AppResult<Option<Company>> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT id, name, creator_id, created_at
            FROM companies
            WHERE id = $1
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find company: {error}")))?;

        Ok(row.map(Company::from))
    }

    async fn find_company_by_creator(&self, creator_id: UserId) -> AppResult<Option<Company>> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT id, name, creator_id, created_at
            FROM companies
            WHERE creator_id = $1
            "#,
        )
        .bind(creator_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find company by creator: {error}"))
        })?;

        Ok(row.map(Company::from))
    }

    async fn create_company(&self, creator_id: UserId, name: &str) -> AppResult<Company> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            INSERT INTO companies (id, name, creator_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, creator_id, created_at
            "#,
        )
        .bind(TenantId::new().as_uuid())
        .bind(name)
        .bind(creator_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            map_conflict(
                error,
                "create company",
                format!("user '{creator_id}' already created a company"),
            )
        })?;

        Ok(Company::from(row))
    }

    async fn find_tenant_for_user(&self, user_id: UserId) -> AppResult<Option<TenantId>> {
        let tenant_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT company_id
            FROM company_members
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to resolve company membership: {error}"))
        })?;

        Ok(tenant_id.map(TenantId::from_uuid))
    }

    async fn create_membership(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO company_members (user_id, company_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(tenant_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            map_conflict(
                error,
                "create company membership",
                format!("user '{user_id}' already belongs to a company"),
            )
        })?;

        Ok(())
    }

    async fn list_members(&self, tenant_id: TenantId) -> AppResult<Vec<CompanyMember>> {
        let rows = sqlx::query_as::<_, CompanyMemberRow>(
            r#"
            SELECT user_id, created_at
            FROM company_members
            WHERE company_id = $1
            ORDER BY created_at, user_id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list company members: {error}"))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| CompanyMember {
                user_id: UserId::from_uuid(row.user_id),
                joined_at: row.created_at,
            })
            .collect())
    }

    async fn add_allowed_email_domain(
        &self,
        tenant_id: TenantId,
        domain: &EmailDomain,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO allowed_email_domains (company_id, domain)
            VALUES ($1, $2)
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(domain.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            map_conflict(
                error,
                "add allowed email domain",
                format!("domain '{}' is already allowed", domain.as_str()),
            )
        })?;

        Ok(())
    }

    async fn list_allowed_email_domains(&self, tenant_id: TenantId) -> AppResult<Vec<EmailDomain>> {
        let domains = sqlx::query_scalar::<_, String>(
            r#"
            SELECT domain
            FROM allowed_email_domains
            WHERE company_id = $1
            ORDER BY domain
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list allowed email domains: {error}"))
        })?;

        domains.into_iter().map(EmailDomain::new).collect()
    }
}

#[cfg(test)]
mod tests;
