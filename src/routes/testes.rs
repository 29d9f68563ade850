//! `testes` resource routes. The path segment after `/testes/` is the record's `uniqueValue`.

use crate::handlers::testes::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn testes_routes(state: AppState) -> Router {
    Router::new()
        .route("/testes", get(list).post(create))
        .route(
            "/testes/:unique_value",
            get(read).patch(update).delete(delete_handler),
        )
        .with_state(state)
}
