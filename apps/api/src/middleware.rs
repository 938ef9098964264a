use advancely_core::{AppError, UserIdentity};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::Session;

use crate::auth::SESSION_USER_KEY;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Rejects state-changing requests that do not come from the frontend.
///
/// Session cookies are `SameSite=Lax` and CORS allows credentials, so role and
/// membership mutations rely on this check instead of a CSRF token.
pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        check_mutation_origin(request.headers(), &state.frontend_url)
            .map_err(|reason| AppError::Unauthorized(reason.to_owned()))?;
    }

    Ok(next.run(request).await)
}

fn check_mutation_origin(headers: &HeaderMap, frontend_url: &str) -> Result<(), &'static str> {
    if headers.get("sec-fetch-site") == Some(&HeaderValue::from_static("cross-site")) {
        return Err("cross-site request blocked");
    }

    let frontend_url = frontend_url.trim_end_matches('/');
    let origin = header_str(headers, header::ORIGIN);
    let referer = header_str(headers, header::REFERER);

    let origin_matches = origin == Some(frontend_url);
    let referer_matches = referer.is_some_and(|referer| {
        referer
            .strip_prefix(frontend_url)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
    });

    if origin_matches || referer_matches {
        Ok(())
    } else {
        Err("origin validation failed")
    }
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
