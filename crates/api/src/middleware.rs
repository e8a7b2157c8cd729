use std::sync::Arc;

use axum::{
    extract::{MatchedPath, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use watchpost_auth::AccessGate;

use crate::app::errors;
use crate::requirements::EndpointRequirements;

#[derive(Clone)]
pub struct GateState {
    pub gate: Arc<AccessGate>,
    pub requirements: Arc<EndpointRequirements>,
}

/// Enforce the route's declared role requirement.
///
/// Routes whose requirement is the empty set pass through untouched: no
/// header inspection, no token decoding. For everything else the bearer
/// token must be present and must satisfy the access gate; the resolved
/// principal is handed to the handler as a request extension.
pub async fn access_gate_middleware(
    State(state): State<GateState>,
    matched_path: MatchedPath,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let required = state
        .requirements
        .lookup(req.method(), matched_path.as_str());

    if required.is_empty() {
        return Ok(next.run(req).await);
    }

    let token = extract_bearer(req.headers())
        .map_err(|status| errors::json_error(status, "missing_bearer", "missing or malformed Authorization header"))?;

    match state.gate.authorize(token, &required).await {
        Ok(Some(principal)) => {
            req.extensions_mut().insert(principal);
            Ok(next.run(req).await)
        }
        // Unreachable for non-empty sets, but the gate's contract allows it.
        Ok(None) => Ok(next.run(req).await),
        Err(e) => Err(errors::auth_error_response(&e)),
    }
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()).unwrap_err(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let headers = headers_with("Basic dXNlcjpwdw==");
        assert!(extract_bearer(&headers).is_err());
    }

    #[test]
    fn empty_bearer_is_unauthorized() {
        let headers = headers_with("Bearer    ");
        assert!(extract_bearer(&headers).is_err());
    }
}
