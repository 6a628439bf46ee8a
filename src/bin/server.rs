use std::sync::Arc;

use shiptrack::config::AppConfig;
use shiptrack::store::postgres::{DbConnection, PgStore};
use shiptrack::web::{self, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let db = DbConnection::new(&config.database_url);
    db.run_migrations().expect("Failed to run migrations");

    let state = AppState::new(Arc::new(PgStore::new(db)), &config.auth);
    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .unwrap();
    tracing::debug!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
