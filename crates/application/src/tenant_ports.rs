use async_trait::async_trait;
use chrono::{DateTime, Utc};

use advancely_core::{AppResult, TenantId, UserId};
use advancely_domain::EmailDomain;

/// Company (tenant) projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    /// Tenant identifier.
    pub id: TenantId,
    /// Display name.
    pub name: String,
    /// User who signed the company up.
    pub creator_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Membership of a user in a company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyMember {
    /// Member user.
    pub user_id: UserId,
    /// When the user joined the company.
    pub joined_at: DateTime<Utc>,
}

/// Port for companies, memberships and company settings.
#[async_trait]
pub trait TenantRepository: Send + Sync {
    /// Finds a company by id.
    async fn find_company(&self, tenant_id: TenantId) -> AppResult<Option<Company>>;

    /// Finds the company created by a user.
    async fn find_company_by_creator(&self, creator_id: UserId) -> AppResult<Option<Company>>;

    /// Creates a company. Reports `Conflict` when the creator already has one.
    async fn create_company(&self, creator_id: UserId, name: &str) -> AppResult<Company>;

    /// Finds the company a user belongs to.
    async fn find_tenant_for_user(&self, user_id: UserId) -> AppResult<Option<TenantId>>;

    /// Adds a user to a company. Reports `Conflict` when the user already belongs to one.
    async fn create_membership(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<()>;

    /// Lists the members of a company ordered by join time.
    async fn list_members(&self, tenant_id: TenantId) -> AppResult<Vec<CompanyMember>>;

    /// Adds an allowed signup email domain. Reports `Conflict` for duplicates.
    async fn add_allowed_email_domain(
        &self,
        tenant_id: TenantId,
        domain: &EmailDomain,
    ) -> AppResult<()>;

    /// Lists allowed signup email domains in alphabetical order.
    async fn list_allowed_email_domains(&self, tenant_id: TenantId) -> AppResult<Vec<EmailDomain>>;
}
