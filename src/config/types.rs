//! Runtime settings for the server.

use std::net::SocketAddr;

/// Which [`TesteStore`](crate::store::TesteStore) backs the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageKind {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageKind::Postgres),
            "memory" => Ok(StorageKind::Memory),
            _ => Err(crate::error::ConfigError::UnknownStorage(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage: StorageKind,
    pub database_url: String,
    /// Schema holding the `testes` table. A plain identifier.
    pub schema: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub body_limit_bytes: usize,
}

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/testes";
pub const DEFAULT_SCHEMA: &str = "testes";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}
