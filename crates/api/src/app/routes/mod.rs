use axum::Router;

pub mod auth;
pub mod roles;
pub mod system;

/// Routes reachable without any token.
pub fn public_router() -> Router {
    auth::public_router()
}

/// Routes behind the access-gate middleware.
pub fn protected_router() -> Router {
    auth::protected_router().merge(roles::router())
}
