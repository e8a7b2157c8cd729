use axum::{Json, http::StatusCode, response::IntoResponse};

/// GET /health: liveness probe, public.
pub async fn health() -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
        .into_response()
}
