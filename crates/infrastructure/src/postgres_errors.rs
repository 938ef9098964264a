use advancely_core::AppError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn has_code(error: &sqlx::Error, code: &str) -> bool {
    matches!(
        error,
        sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some(code)
    )
}

/// Returns whether the statement hit a unique constraint.
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    has_code(error, UNIQUE_VIOLATION)
}

/// Returns whether the statement referenced a missing row.
pub(crate) fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    has_code(error, FOREIGN_KEY_VIOLATION)
}

/// Maps a unique violation to `Conflict` and everything else to `Internal`.
pub(crate) fn map_conflict(error: sqlx::Error, operation: &str, conflict: String) -> AppError {
    if is_unique_violation(&error) {
        return AppError::Conflict(conflict);
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

