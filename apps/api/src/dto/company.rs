use advancely_application::{Company, CompanyMember};
use advancely_domain::EmailDomain;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of the caller's company.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/company-response.ts"
)]
pub struct CompanyResponse {
    pub company_id: String,
    pub name: String,
    pub creator_id: String,
    pub created_at: String,
}

impl From<Company> for CompanyResponse {
    fn from(value: Company) -> Self {
        Self {
            company_id: value.id.to_string(),
            name: value.name,
            creator_id: value.creator_id.to_string(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// API representation of a company member.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/company-member-response.ts"
)]
pub struct CompanyMemberResponse {
    pub user_id: String,
    pub joined_at: String,
}

impl From<CompanyMember> for CompanyMemberResponse {
    fn from(value: CompanyMember) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            joined_at: value.joined_at.to_rfc3339(),
        }
    }
}

/// Incoming payload for allowing signups from an email domain.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/allowed-email-domain-request.ts"
)]
pub struct AllowedEmailDomainRequest {
    pub domain: String,
}

/// API representation of an allowed signup email domain.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/allowed-email-domain-response.ts"
)]
pub struct AllowedEmailDomainResponse {
    pub domain: String,
}

impl From<EmailDomain> for AllowedEmailDomainResponse {
    fn from(value: EmailDomain) -> Self {
        Self {
            domain: value.as_str().to_owned(),
        }
    }
}
