use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use watchpost_auth::AuthError;

/// Map an authorization failure to its HTTP rejection.
///
/// Credential failures and token failures are 401; an authenticated caller
/// who is stale or under-privileged is 403; scope-configuration errors keep
/// their distinct 404 codes. Malformed account state and backend failures
/// surface as 500 without detail.
pub fn auth_error_response(err: &AuthError) -> axum::response::Response {
    match err {
        AuthError::InvalidCredentials => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", err.to_string())
        }
        AuthError::InvalidToken => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_token", err.to_string())
        }
        AuthError::MalformedToken => {
            json_error(StatusCode::UNAUTHORIZED, "malformed_token", err.to_string())
        }
        AuthError::StaleAssignment => {
            json_error(StatusCode::FORBIDDEN, "stale_assignment", err.to_string())
        }
        AuthError::InsufficientRole(_) => {
            json_error(StatusCode::FORBIDDEN, "insufficient_role", err.to_string())
        }
        AuthError::MissingOrganization => json_error(
            StatusCode::NOT_FOUND,
            "organization_not_found",
            err.to_string(),
        ),
        AuthError::MissingOfficeAssignment => json_error(
            StatusCode::NOT_FOUND,
            "office_assignment_not_found",
            err.to_string(),
        ),
        AuthError::RoleNotAssigned | AuthError::AmbiguousAssignment => {
            tracing::warn!(error = %err, "malformed account state");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "account_state_error",
                err.to_string(),
            )
        }
        AuthError::Store(e) => {
            tracing::error!(error = %e, "credential store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            )
        }
        AuthError::PasswordHash(_) => {
            tracing::error!("stored password hash is unusable");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
