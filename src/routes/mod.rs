//! Router assembly.

mod common;
mod testes;

pub use common::common_routes;
pub use testes::testes_routes;
