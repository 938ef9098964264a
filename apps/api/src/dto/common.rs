use advancely_core::UserIdentity;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of the authenticated user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-identity-response.ts"
)]
pub struct UserIdentityResponse {
    pub user_id: String,
    pub email: Option<String>,
    pub tenant_id: String,
}

impl From<UserIdentity> for UserIdentityResponse {
    fn from(value: UserIdentity) -> Self {
        Self {
            user_id: value.user_id().to_string(),
            email: value.email().map(ToOwned::to_owned),
            tenant_id: value.tenant_id().to_string(),
        }
    }
}

/// Raw `page` / `page_size` query parameters.
///
/// Kept as strings so that malformed values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PageQuery {
    /// Returns the requested page, defaulting to 1.
    pub fn page(&self) -> u32 {
        parse_positive(self.page.as_deref())
    }

    /// Returns the requested page size, defaulting to 1.
    pub fn page_size(&self) -> u32 {
        parse_positive(self.page_size.as_deref())
    }
}

fn parse_positive(value: Option<&str>) -> u32 {
    value
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value >= 1)
        .unwrap_or(1)
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/page-metadata.ts"
)]
pub struct PageMetadata {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u32,
    pub total_pages: u32,
}

/// One page of a list response.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/paged-response.ts"
)]
pub struct PagedResponse<T: TS> {
    pub metadata: PageMetadata,
    pub items: Vec<T>,
}

impl<T: TS> PagedResponse<T> {
    /// Slices a complete item list down to the requested page.
    pub fn paginate(items: Vec<T>, query: &PageQuery) -> Self {
        let page = query.page();
        let page_size = query.page_size();
        let total_items = u32::try_from(items.len()).unwrap_or(u32::MAX);

        let size = page_size as usize;
        let start = ((page - 1) as usize).saturating_mul(size).min(items.len());
        let end = start.saturating_add(size).min(items.len());

        Self {
            metadata: PageMetadata {
                page,
                page_size,
                total_items,
                total_pages: total_items.div_ceil(page_size),
            },
            items: items.into_iter().skip(start).take(end - start).collect(),
        }
    }
}
