//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El store se construye una sola vez en
//! `main` y se inyecta aquí.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::EntityStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>, config: EnvironmentConfig) -> Self {
        Self { store, config }
    }
}
