use advancely_core::AppError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_)
            | AppError::RoleNotFound(_)
            | AppError::PermissionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::CannotUpdateSystemRole(_) | AppError::CannotDeleteSystemRole(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
        }

        let payload = Json(ErrorResponse {
            message: self.0.to_string(),
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use advancely_core::{AppError, PermissionId, RoleId};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::ApiError;

    fn status_of(error: AppError) -> StatusCode {
        ApiError::from(error).into_response().status()
    }

    #[test]
    fn maps_error_kinds_to_statuses() {
        assert_eq!(
            status_of(AppError::Validation("bad".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("gone".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::RoleNotFound(RoleId::new(9))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::PermissionNotFound(PermissionId::new(99))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Conflict("dup".to_owned())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Unauthorized("who".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Forbidden("no".to_owned())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::Internal("boom".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn system_role_violations_are_unprocessable() {
        assert_eq!(
            status_of(AppError::CannotUpdateSystemRole(RoleId::new(1))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::CannotDeleteSystemRole(RoleId::new(1))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
