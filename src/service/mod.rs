//! TestesService: record lifecycle over a pluggable store, plus request validation.

mod testes;
mod validation;
pub use testes::TestesService;
pub use validation::{Check, FieldRule, PayloadShape, RequestValidator, CREATE_SHAPE, UPDATE_SHAPE};
