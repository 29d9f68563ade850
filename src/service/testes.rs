//! Lifecycle operations for `testes` records.

use crate::error::AppError;
use crate::model::{CreateTeste, Teste, UpdateTeste};
use crate::store::TesteStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct TestesService {
    store: Arc<dyn TesteStore>,
}

fn not_found(unique_value: &str) -> AppError {
    AppError::NotFound(format!("Test {} not found", unique_value))
}

impl TestesService {
    pub fn new(store: Arc<dyn TesteStore>) -> Self {
        TestesService { store }
    }

    pub fn store(&self) -> &Arc<dyn TesteStore> {
        &self.store
    }

    /// Persist a validated payload. Duplicate keys surface as the store's conflict.
    pub async fn create(&self, payload: CreateTeste) -> Result<Teste, AppError> {
        let record = self.store.insert(payload).await?;
        tracing::info!(unique_value = %record.unique_value, id = %record.id, "teste created");
        Ok(record)
    }

    pub async fn find_all(&self) -> Result<Vec<Teste>, AppError> {
        self.store.find_all().await
    }

    pub async fn find_one(&self, unique_value: &str) -> Result<Teste, AppError> {
        self.store
            .find_by_unique_value(unique_value)
            .await?
            .ok_or_else(|| not_found(unique_value))
    }

    /// Apply the fields present in `patch` to the record keyed by `unique_value`.
    /// Returns the record after the write.
    pub async fn update(&self, unique_value: &str, patch: UpdateTeste) -> Result<Teste, AppError> {
        let record = self
            .store
            .update_by_unique_value(unique_value, &patch)
            .await?
            .ok_or_else(|| not_found(unique_value))?;
        tracing::info!(unique_value = %unique_value, "teste updated");
        Ok(record)
    }

    /// Delete the record keyed by `unique_value`. Returns it as it was before deletion.
    pub async fn remove(&self, unique_value: &str) -> Result<Teste, AppError> {
        let record = self
            .store
            .delete_by_unique_value(unique_value)
            .await?
            .ok_or_else(|| not_found(unique_value))?;
        tracing::info!(unique_value = %unique_value, "teste deleted");
        Ok(record)
    }
}
