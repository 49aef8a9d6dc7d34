use std::sync::Arc;

use crate::models::{InsertRoute, Route, RouteFilters};
use crate::repositories::EntityStore;
use crate::utils::errors::{internal_error, not_found_error, AppError};
use crate::utils::validation::parse_id;

pub struct RouteController {
    store: Arc<dyn EntityStore>,
}

impl RouteController {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filters: &RouteFilters) -> Result<Vec<Route>, AppError> {
        let routes = self
            .store
            .get_routes()
            .await
            .map_err(|e| internal_error("Failed to fetch routes", e))?;

        Ok(routes.into_iter().filter(|r| filters.matches(r)).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Route, AppError> {
        let Some(id) = parse_id(id) else {
            return Err(not_found_error("Route not found"));
        };

        self.store
            .get_route(id)
            .await
            .map_err(|e| internal_error("Failed to fetch route", e))?
            .ok_or_else(|| not_found_error("Route not found"))
    }

    pub async fn create(&self, payload: InsertRoute) -> Result<Route, AppError> {
        self.store
            .create_route(payload)
            .await
            .map_err(|e| internal_error("Failed to create route", e))
    }
}
