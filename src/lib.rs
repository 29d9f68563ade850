//! Testes API: a single REST resource over a document store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, StorageKind};
pub use error::{AppError, ConfigError};
pub use model::{CreateTeste, Teste, UpdateTeste};
pub use routes::{common_routes, testes_routes};
pub use service::{RequestValidator, TestesService};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryTesteStore, PgTesteStore, TesteStore};

use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application router: common routes plus the testes resource.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(testes_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
