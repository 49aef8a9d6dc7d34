//! Modelo de UserFavorite
//!
//! Relación muchos-a-muchos entre usuarios y rutas guardadas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserFavorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub route_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Payload de favorito; `userId` llega desde el path y se mezcla en el cuerpo
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertUserFavorite {
    pub user_id: Uuid,
    pub route_id: Uuid,
}

impl UserFavorite {
    pub fn from_insert(payload: InsertUserFavorite) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: payload.user_id,
            route_id: payload.route_id,
            created_at: Utc::now(),
        }
    }
}
