//! Shared application state for all routes.

use crate::service::TestesService;
use crate::store::TesteStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub testes: TestesService,
}

impl AppState {
    pub fn new(store: Arc<dyn TesteStore>) -> Self {
        AppState {
            testes: TestesService::new(store),
        }
    }
}
