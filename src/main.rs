//! Server binary: reads config from the environment, prepares the store, serves the API.

use std::sync::Arc;
use testes_api::{app, ensure_database_exists, AppConfig, AppState, MemoryTesteStore, PgTesteStore, StorageKind, TesteStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("testes_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let store: Arc<dyn TesteStore> = match config.storage {
        StorageKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            let store = PgTesteStore::new(pool, &config.schema);
            store.ensure_table().await?;
            Arc::new(store)
        }
        StorageKind::Memory => {
            tracing::warn!("using in-memory store; records are lost on restart");
            Arc::new(MemoryTesteStore::new())
        }
    };

    let router = app(AppState::new(store), config.body_limit_bytes);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
