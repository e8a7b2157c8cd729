//! Role reference endpoints.

use std::sync::Arc;

use axum::{Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get};

use crate::app::dto::RoleDto;
use crate::app::{AppServices, errors};

pub fn router() -> Router {
    Router::new()
        .route("/roles", get(list_roles))
        .route("/roles/assignable", get(list_assignable_roles))
}

/// GET /roles: the full role catalog (platform administration).
pub async fn list_roles(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store.list_roles().await {
        Ok(roles) => {
            let roles: Vec<RoleDto> = roles.iter().map(RoleDto::from).collect();
            (StatusCode::OK, Json(serde_json::json!({ "roles": roles }))).into_response()
        }
        Err(e) => errors::auth_error_response(&e.into()),
    }
}

/// GET /roles/assignable: roles an organization may grant to its own
/// people (platform-level and externally provisioned roles excluded).
pub async fn list_assignable_roles(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store.list_roles().await {
        Ok(roles) => {
            let roles: Vec<RoleDto> = roles
                .iter()
                .filter(|r| r.name.organization_assignable())
                .map(RoleDto::from)
                .collect();
            (StatusCode::OK, Json(serde_json::json!({ "roles": roles }))).into_response()
        }
        Err(e) => errors::auth_error_response(&e.into()),
    }
}
