use advancely_core::{AppError, TenantId, UserId, UserIdentity};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::{SESSION_CREATED_AT_KEY, SESSION_USER_KEY};

/// Session establishment payload for development and test environments.
#[derive(Debug, Deserialize)]
pub struct BootstrapRequest {
    pub user_id: Uuid,
    pub email: Option<String>,
    /// Registers (or re-registers) the user's company when present.
    pub company_name: Option<String>,
    pub token: String,
}

pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    if !tokens_match(&payload.token, &state.bootstrap_token) {
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let user_id = UserId::from_uuid(payload.user_id);
    let tenant_id = resolve_tenant(&state, user_id, payload.company_name.as_deref()).await?;
    let identity = UserIdentity::new(user_id, payload.email, tenant_id);

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    session
        .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session creation time: {error}"))
        })?;

    tracing::info!(user_id = %user_id, tenant_id = %tenant_id, "session established");

    Ok(StatusCode::NO_CONTENT)
}

/// Compares tokens without short-circuiting on the first differing byte.
fn tokens_match(provided: &str, expected: &str) -> bool {
    let (provided, expected) = (provided.as_bytes(), expected.as_bytes());
    if expected.is_empty() || provided.len() != expected.len() {
        return false;
    }

    let diff = provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (left, right)| diff | (left ^ right));
    diff == 0
}

async fn resolve_tenant(
    state: &AppState,
    user_id: UserId,
    company_name: Option<&str>,
) -> ApiResult<TenantId> {
    if let Some(company_name) = company_name {
        let company = state
            .tenant_service
            .register_company(user_id, company_name)
            .await?;
        return Ok(company.id);
    }

    state
        .tenant_service
        .tenant_for_user(user_id)
        .await?
        .ok_or_else(|| {
            ApiError::from(AppError::Unauthorized(format!(
                "user '{user_id}' does not belong to a company"
            )))
        })
}

#[cfg(test)]
mod tests;
