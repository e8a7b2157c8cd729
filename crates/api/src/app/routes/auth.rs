//! Login and identity echo endpoints.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use watchpost_auth::AuthenticatedPrincipal;

use crate::app::dto::{LoginRequest, LoginResponse, UserDto};
use crate::app::{AppServices, errors};

pub fn public_router() -> Router {
    Router::new().route("/auth/login", post(login))
}

pub fn protected_router() -> Router {
    Router::new().route("/auth/me", get(me))
}

/// POST /auth/login: authenticate a credential pair and mint a token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(req): Json<LoginRequest>,
) -> axum::response::Response {
    match services.authenticator.login(&req.email, &req.password).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(LoginResponse {
                token: outcome.token,
                user: UserDto::from(&outcome.user),
            }),
        )
            .into_response(),
        Err(e) => errors::auth_error_response(&e),
    }
}

/// GET /auth/me: echo the authenticated principal resolved by the gate.
pub async fn me(Extension(principal): Extension<AuthenticatedPrincipal>) -> axum::response::Response {
    (StatusCode::OK, Json(principal)).into_response()
}
