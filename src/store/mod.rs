//! Record storage. The service talks to a [`TesteStore`]; backends decide how documents are kept.

mod memory;
mod postgres;

pub use memory::MemoryTesteStore;
pub use postgres::{ensure_database_exists, PgTesteStore};

use crate::error::AppError;
use crate::model::{CreateTeste, Teste, UpdateTeste};
use async_trait::async_trait;

/// Point operations over `testes` documents, keyed by `unique_value`.
///
/// Implementations enforce uniqueness of `unique_value` themselves and report a
/// duplicate insert as [`AppError::Conflict`]. Lookups return `Ok(None)` when
/// nothing matches; turning that into a not-found error is the caller's job.
#[async_trait]
pub trait TesteStore: Send + Sync {
    async fn insert(&self, payload: CreateTeste) -> Result<Teste, AppError>;

    /// All records, oldest first.
    async fn find_all(&self) -> Result<Vec<Teste>, AppError>;

    async fn find_by_unique_value(&self, unique_value: &str) -> Result<Option<Teste>, AppError>;

    /// Merge `patch` into the matching record and return it as it is after the write.
    async fn update_by_unique_value(
        &self,
        unique_value: &str,
        patch: &UpdateTeste,
    ) -> Result<Option<Teste>, AppError>;

    /// Remove the matching record and return it as it was.
    async fn delete_by_unique_value(&self, unique_value: &str) -> Result<Option<Teste>, AppError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn duplicate_key_message(unique_value: &str) -> String {
    format!("Test {} already exists", unique_value)
}
