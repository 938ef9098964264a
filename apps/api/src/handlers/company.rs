use advancely_core::UserIdentity;
use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;

use crate::dto::{
    AllowedEmailDomainRequest, AllowedEmailDomainResponse, CompanyMemberResponse, CompanyResponse,
    PageQuery, PagedResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn company_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<CompanyResponse>> {
    let company = state.tenant_service.company(user.tenant_id()).await?;

    Ok(Json(CompanyResponse::from(company)))
}

pub async fn list_company_members_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<PagedResponse<CompanyMemberResponse>>> {
    let members = state
        .tenant_service
        .members(&user)
        .await?
        .into_iter()
        .map(CompanyMemberResponse::from)
        .collect();

    Ok(Json(PagedResponse::paginate(members, &query)))
}

pub async fn list_allowed_email_domains_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<AllowedEmailDomainResponse>>> {
    let domains = state
        .tenant_service
        .allowed_email_domains(&user)
        .await?
        .into_iter()
        .map(AllowedEmailDomainResponse::from)
        .collect();

    Ok(Json(domains))
}

pub async fn add_allowed_email_domain_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<AllowedEmailDomainRequest>,
) -> ApiResult<(StatusCode, Json<AllowedEmailDomainResponse>)> {
    let domain = state
        .tenant_service
        .add_allowed_email_domain(&user, &payload.domain)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AllowedEmailDomainResponse::from(domain)),
    ))
}
