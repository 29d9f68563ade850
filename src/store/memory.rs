//! In-process store. Records live in insertion order behind a lock.

use super::{duplicate_key_message, TesteStore};
use crate::error::AppError;
use crate::model::{CreateTeste, Teste, UpdateTeste};
use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MemoryTesteStore {
    records: Arc<RwLock<Vec<Teste>>>,
}

impl MemoryTesteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Teste>>, AppError> {
        self.records
            .read()
            .map_err(|_| AppError::Internal("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Teste>>, AppError> {
        self.records
            .write()
            .map_err(|_| AppError::Internal("lock poisoned".into()))
    }
}

#[async_trait]
impl TesteStore for MemoryTesteStore {
    async fn insert(&self, payload: CreateTeste) -> Result<Teste, AppError> {
        let mut records = self.write()?;
        if records.iter().any(|r| r.unique_value == payload.unique_value) {
            return Err(AppError::Conflict(duplicate_key_message(&payload.unique_value)));
        }
        let record = Teste::new(Uuid::new_v4(), payload);
        records.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<Teste>, AppError> {
        Ok(self.read()?.clone())
    }

    async fn find_by_unique_value(&self, unique_value: &str) -> Result<Option<Teste>, AppError> {
        Ok(self
            .read()?
            .iter()
            .find(|r| r.unique_value == unique_value)
            .cloned())
    }

    async fn update_by_unique_value(
        &self,
        unique_value: &str,
        patch: &UpdateTeste,
    ) -> Result<Option<Teste>, AppError> {
        let mut records = self.write()?;
        Ok(records
            .iter_mut()
            .find(|r| r.unique_value == unique_value)
            .map(|r| {
                patch.apply_to(r);
                r.clone()
            }))
    }

    async fn delete_by_unique_value(&self, unique_value: &str) -> Result<Option<Teste>, AppError> {
        let mut records = self.write()?;
        Ok(records
            .iter()
            .position(|r| r.unique_value == unique_value)
            .map(|idx| records.remove(idx)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
