//! Modelo de Route
//!
//! Este módulo contiene el struct Route, su payload de creación y los
//! filtros que usa la lista de rutas de la app.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::validate_categories;

/// Route principal - mapea a la tabla routes (category es JSONB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: Uuid,
    pub number: String,
    pub from_location: String,
    pub to_location: String,
    pub duration: String,
    pub distance: String,
    pub seats: String,
    /// Texto libre: "Active", "En Route", "Delayed", ...
    pub status: String,
    pub category: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload de alta de ruta
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertRoute {
    pub number: String,
    pub from_location: String,
    pub to_location: String,
    pub duration: String,
    pub distance: String,
    pub seats: String,
    pub status: String,
    #[validate(length(min = 1), custom = "validate_categories")]
    pub category: Vec<String>,
}

/// Filtros de la lista de rutas (chips "All", "Popular", "Religious", ...)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteFilters {
    pub category: Option<String>,
    pub status: Option<String>,
}

impl Route {
    pub fn from_insert(payload: InsertRoute) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: payload.number,
            from_location: payload.from_location,
            to_location: payload.to_location,
            duration: payload.duration,
            distance: payload.distance,
            seats: payload.seats,
            status: payload.status,
            category: payload.category,
            created_at: Utc::now(),
        }
    }

    pub fn has_category(&self, tag: &str) -> bool {
        self.category.iter().any(|c| c.eq_ignore_ascii_case(tag))
    }
}

impl RouteFilters {
    pub fn matches(&self, route: &Route) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some("") => true,
            Some(tag) if tag.eq_ignore_ascii_case("all") => true,
            Some(tag) => route.has_category(tag),
        };
        let status_ok = match self.status.as_deref() {
            None | Some("") => true,
            Some(status) => route.status.eq_ignore_ascii_case(status),
        };
        category_ok && status_ok
    }
}
