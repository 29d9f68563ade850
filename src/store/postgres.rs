//! PostgreSQL document store. Each record is one row: the key in an indexed
//! column, the mutable fields in a JSONB document.

use super::{duplicate_key_message, TesteStore};
use crate::error::{AppError, ConfigError};
use crate::model::{CreateTeste, Teste, UpdateTeste};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

const TABLE: &str = "testes";
const RETURNING: &str = "RETURNING id, unique_value, document";

type DocumentRow = (Uuid, String, Value);

/// The JSONB body of a row.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    test_value: String,
    other_value: Number,
}

#[derive(Clone)]
pub struct PgTesteStore {
    pool: PgPool,
    schema: String,
    table: String,
}

impl PgTesteStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgTesteStore {
            pool,
            schema: schema.to_string(),
            table: format!("{}.{}", quote_ident(schema), quote_ident(TABLE)),
        }
    }

    /// Create the schema and the `testes` table if missing. Safe to call on every start.
    pub async fn ensure_table(&self) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(&self.schema)))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                unique_value TEXT NOT NULL UNIQUE,
                document JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        tracing::info!(table = %self.table, "testes table ready");
        Ok(())
    }
}

fn row_to_teste((id, unique_value, document): DocumentRow) -> Result<Teste, AppError> {
    let doc: Document = serde_json::from_value(document)
        .map_err(|e| AppError::Internal(format!("malformed document for {}: {}", unique_value, e)))?;
    Ok(Teste {
        id,
        unique_value,
        test_value: doc.test_value,
        other_value: doc.other_value,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl TesteStore for PgTesteStore {
    async fn insert(&self, payload: CreateTeste) -> Result<Teste, AppError> {
        let document = serde_json::to_value(Document {
            test_value: payload.test_value,
            other_value: payload.other_value,
        })
        .map_err(|e| AppError::Internal(e.to_string()))?;
        let sql = format!(
            "INSERT INTO {} (id, unique_value, document) VALUES ($1, $2, $3) {}",
            self.table, RETURNING
        );
        tracing::debug!(sql = %sql, unique_value = %payload.unique_value, "query");
        let row: DocumentRow = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(&payload.unique_value)
            .bind(&document)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(duplicate_key_message(&payload.unique_value))
                } else {
                    AppError::Db(e)
                }
            })?;
        row_to_teste(row)
    }

    async fn find_all(&self) -> Result<Vec<Teste>, AppError> {
        let sql = format!(
            "SELECT id, unique_value, document FROM {} ORDER BY created_at, id",
            self.table
        );
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<DocumentRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(row_to_teste).collect()
    }

    async fn find_by_unique_value(&self, unique_value: &str) -> Result<Option<Teste>, AppError> {
        let sql = format!(
            "SELECT id, unique_value, document FROM {} WHERE unique_value = $1",
            self.table
        );
        tracing::debug!(sql = %sql, unique_value = %unique_value, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(unique_value)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_teste).transpose()
    }

    async fn update_by_unique_value(
        &self,
        unique_value: &str,
        patch: &UpdateTeste,
    ) -> Result<Option<Teste>, AppError> {
        // Absent fields are skipped during serialization, so the merge leaves them alone.
        let patch = serde_json::to_value(patch).map_err(|e| AppError::Internal(e.to_string()))?;
        let sql = format!(
            "UPDATE {} SET document = document || $2, updated_at = clock_timestamp() WHERE unique_value = $1 {}",
            self.table, RETURNING
        );
        tracing::debug!(sql = %sql, unique_value = %unique_value, patch = %patch, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(unique_value)
            .bind(&patch)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_teste).transpose()
    }

    async fn delete_by_unique_value(&self, unique_value: &str) -> Result<Option<Teste>, AppError> {
        let sql = format!("DELETE FROM {} WHERE unique_value = $1 {}", self.table, RETURNING);
        tracing::debug!(sql = %sql, unique_value = %unique_value, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(unique_value)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_teste).transpose()
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_target(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the maintenance `postgres` database on the same server, and the
/// database named in the URL. `None` when the URL names no database or names `postgres`.
fn admin_target(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::InvalidValue {
        key: "DATABASE_URL",
        value: e.to_string(),
    })?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
