//! Server configuration: types and environment loading.

mod loader;
pub mod types;

pub use types::*;
