use std::sync::Arc;

use advancely_core::{AppError, AppResult, NonEmptyString, TenantId, UserId, UserIdentity};
use advancely_domain::{EmailDomain, PermissionName, SystemRole};

use crate::tenant_ports::{Company, CompanyMember, TenantRepository};
use crate::{AuthorizationService, RoleStore};

/// Company onboarding and company settings.
#[derive(Clone)]
pub struct TenantService {
    repository: Arc<dyn TenantRepository>,
    role_store: RoleStore,
    authorization_service: AuthorizationService,
}

impl TenantService {
    /// Creates a tenant service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn TenantRepository>,
        role_store: RoleStore,
        authorization_service: AuthorizationService,
    ) -> Self {
        Self {
            repository,
            role_store,
            authorization_service,
        }
    }

    /// Signs a user up as the creator and administrator of a company.
    ///
    /// Every step is get-or-create, so re-running after a partial failure
    /// converges on one company, one membership and one `Admin` assignment.
    pub async fn register_company(&self, user_id: UserId, company_name: &str) -> AppResult<Company> {
        let company_name = NonEmptyString::new(company_name.trim())
            .map_err(|_| AppError::Validation("company name must not be empty".to_owned()))?;

        let company = self.company_created_by(user_id, company_name.as_str()).await?;
        self.ensure_membership(company.id, user_id).await?;
        self.role_store
            .assign_system_role_to_user(SystemRole::Admin, user_id, company.id)
            .await?;

        tracing::info!(
            tenant_id = %company.id,
            user_id = %user_id,
            "registered company"
        );

        Ok(company)
    }

    /// Resolves the company a user belongs to.
    pub async fn tenant_for_user(&self, user_id: UserId) -> AppResult<Option<TenantId>> {
        self.repository.find_tenant_for_user(user_id).await
    }

    /// Returns a company by id.
    pub async fn company(&self, tenant_id: TenantId) -> AppResult<Company> {
        self.repository
            .find_company(tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("company '{tenant_id}' does not exist")))
    }

    /// Allows signups from an email domain in the actor's company.
    pub async fn add_allowed_email_domain(
        &self,
        actor: &UserIdentity,
        domain: &str,
    ) -> AppResult<EmailDomain> {
        self.authorization_service
            .require_permission(actor, PermissionName::EditOrganizationSettings)
            .await?;

        let domain = EmailDomain::new(domain)?;
        self.repository
            .add_allowed_email_domain(actor.tenant_id(), &domain)
            .await?;

        tracing::info!(
            tenant_id = %actor.tenant_id(),
            actor = %actor.user_id(),
            domain = domain.as_str(),
            "added allowed email domain"
        );

        Ok(domain)
    }

    /// Lists email domains allowed to sign up in the actor's company.
    pub async fn allowed_email_domains(&self, actor: &UserIdentity) -> AppResult<Vec<EmailDomain>> {
        self.repository
            .list_allowed_email_domains(actor.tenant_id())
            .await
    }

    /// Lists the members of the actor's company ordered by join time.
    pub async fn members(&self, actor: &UserIdentity) -> AppResult<Vec<CompanyMember>> {
        self.repository.list_members(actor.tenant_id()).await
    }

    async fn company_created_by(&self, user_id: UserId, name: &str) -> AppResult<Company> {
        if let Some(company) = self.repository.find_company_by_creator(user_id).await? {
            return Ok(company);
        }

        match self.repository.create_company(user_id, name).await {
            Err(AppError::Conflict(_)) => self
                .repository
                .find_company_by_creator(user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "company created by user '{user_id}' vanished after conflict"
                    ))
                }),
            result => result,
        }
    }

    async fn ensure_membership(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<()> {
        let existing = match self.repository.find_tenant_for_user(user_id).await? {
            Some(existing) => existing,
            None => match self.repository.create_membership(tenant_id, user_id).await {
                Ok(()) => return Ok(()),
                Err(AppError::Conflict(_)) => self
                    .repository
                    .find_tenant_for_user(user_id)
                    .await?
                    .unwrap_or(tenant_id),
                Err(error) => return Err(error),
            },
        };

        if existing != tenant_id {
            return Err(AppError::Conflict(format!(
                "user '{user_id}' already belongs to company '{existing}'"
            )));
        }

        Ok(())
    }
}
