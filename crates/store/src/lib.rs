//! `watchpost-store` — Credential Store implementations.
//!
//! Two backends for the [`watchpost_auth::CredentialStore`] port: an
//! in-memory store for development and tests, and a Postgres store for
//! deployment.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryCredentialStore;
pub use postgres::PostgresCredentialStore;
