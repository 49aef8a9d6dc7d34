//! Modelo de User
//!
//! Pasajero registrado desde la pantalla de login por teléfono.
//! Mapea exactamente a la tabla users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// Payload de alta de usuario (sin campos asignados por el servidor)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertUser {
    pub name: String,
    pub phone: String,
}

/// Filtros para búsqueda de usuarios
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilters {
    pub phone: Option<String>,
}

impl User {
    pub fn from_insert(payload: InsertUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: payload.name,
            phone: payload.phone,
            created_at: Utc::now(),
        }
    }
}
