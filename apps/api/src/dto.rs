mod common;
mod company;
mod security;

pub use common::{HealthResponse, PageMetadata, PageQuery, PagedResponse, UserIdentityResponse};
pub use company::{
    AllowedEmailDomainRequest, AllowedEmailDomainResponse, CompanyMemberResponse, CompanyResponse,
};
pub use security::{
    CreateRoleRequest, PermissionResponse, RoleAssignmentResponse, RoleResponse,
    UpdateRoleRequest, UserRoleCollectionResponse, UserRoleResponse,
};

#[cfg(test)]
mod tests {
    use ts_rs::{Config, TS};

    use super::{
        AllowedEmailDomainRequest, AllowedEmailDomainResponse, CompanyMemberResponse,
        CompanyResponse, CreateRoleRequest, HealthResponse, PageMetadata, PagedResponse, PermissionResponse, RoleAssignmentResponse,
        RoleResponse, UpdateRoleRequest, UserIdentityResponse, UserRoleCollectionResponse,
        UserRoleResponse,
    };
    use crate::error::ErrorResponse;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        HealthResponse::export(&config)?;
        UserIdentityResponse::export(&config)?;
        PageMetadata::export(&config)?;
        PagedResponse::<RoleResponse>::export(&config)?;
        CreateRoleRequest::export(&config)?;
        UpdateRoleRequest::export(&config)?;
        PermissionResponse::export(&config)?;
        RoleResponse::export(&config)?;
        RoleAssignmentResponse::export(&config)?;
        UserRoleResponse::export(&config)?;
        UserRoleCollectionResponse::export(&config)?;
        CompanyResponse::export(&config)?;
        CompanyMemberResponse::export(&config)?;
        AllowedEmailDomainRequest::export(&config)?;
        AllowedEmailDomainResponse::export(&config)?;
        ErrorResponse::export(&config)?;

        Ok(())
    }
}
