//! HTTP handlers for the testes resource.

pub mod testes;
pub use testes::*;
