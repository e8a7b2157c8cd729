use std::sync::Arc;

use watchpost_auth::CredentialStore;
use watchpost_store::{InMemoryCredentialStore, PostgresCredentialStore};

#[tokio::main]
async fn main() {
    watchpost_observability::init();

    // A missing signing secret is a fatal configuration error. Refusing to
    // start beats minting unverifiable tokens later.
    let jwt_secret = std::env::var("JWT_SECRET")
        .expect("JWT_SECRET must be set; refusing to start without a signing secret");

    let store: Arc<dyn CredentialStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .expect("failed to connect to Postgres");
            Arc::new(PostgresCredentialStore::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory credential store");
            Arc::new(InMemoryCredentialStore::new())
        }
    };

    let app = watchpost_api::app::build_app(store, jwt_secret.as_bytes());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
