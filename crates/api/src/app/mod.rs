//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::http::Method;
use axum::{Extension, Router, routing::get};

use watchpost_auth::{AccessGate, Authenticator, CredentialStore, JwtCodec, RoleName, RoleSet};

use crate::middleware::{self, GateState};
use crate::requirements::EndpointRequirements;

pub mod dto;
pub mod errors;
pub mod routes;

/// Services shared by route handlers.
pub struct AppServices {
    pub authenticator: Authenticator,
    pub store: Arc<dyn CredentialStore>,
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(store: Arc<dyn CredentialStore>, jwt_secret: &[u8]) -> Router {
    let codec = Arc::new(JwtCodec::new(jwt_secret));
    let gate = Arc::new(AccessGate::new(store.clone(), codec.clone()));
    let authenticator = Authenticator::new(store.clone(), codec);

    let services = Arc::new(AppServices {
        authenticator,
        store,
    });

    // Every protected route is declared here, at startup. The middleware
    // consults this table directly; an empty set means no check at all.
    let requirements = Arc::new(
        EndpointRequirements::new()
            .require(Method::GET, "/auth/me", RoleSet::any())
            .require(Method::GET, "/roles", RoleName::SuperAdmin)
            .require(Method::GET, "/roles/assignable", RoleName::OrganizationAdmin),
    );

    let gate_state = GateState { gate, requirements };

    let protected = routes::protected_router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            gate_state,
            middleware::access_gate_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::public_router().layer(Extension(services)))
        .merge(protected)
}
