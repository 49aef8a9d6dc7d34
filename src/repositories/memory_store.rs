//! Store transitorio en memoria
//!
//! Los datos viven mientras viva el proceso. Las rutas y los favoritos se
//! guardan en orden de inserción. Aplica las mismas restricciones que la
//! base de datos: teléfono único y referencias existentes en favoritos.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{EntityStore, StoreError, StoreResult};
use crate::models::{InsertRoute, InsertUser, InsertUserFavorite, Route, User, UserFavorite};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    routes: RwLock<Vec<Route>>,
    favorites: RwLock<Vec<UserFavorite>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_user_by_phone(&self, phone: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.phone == phone).cloned())
    }

    async fn create_user(&self, payload: InsertUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.phone == payload.phone) {
            return Err(StoreError::Conflict {
                entity: "User",
                field: "phone",
                value: payload.phone,
            });
        }

        let user = User::from_insert(payload);
        users.insert(user.id, user.clone());
        debug!("👤 Usuario creado en memoria: {}", user.id);
        Ok(user)
    }

    async fn get_routes(&self) -> StoreResult<Vec<Route>> {
        Ok(self.routes.read().await.clone())
    }

    async fn get_route(&self, id: Uuid) -> StoreResult<Option<Route>> {
        Ok(self.routes.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn create_route(&self, payload: InsertRoute) -> StoreResult<Route> {
        let route = Route::from_insert(payload);
        self.routes.write().await.push(route.clone());
        Ok(route)
    }

    async fn get_user_favorites(&self, user_id: Uuid) -> StoreResult<Vec<UserFavorite>> {
        let favorites = self.favorites.read().await;
        Ok(favorites.iter().filter(|f| f.user_id == user_id).cloned().collect())
    }

    async fn add_user_favorite(&self, payload: InsertUserFavorite) -> StoreResult<UserFavorite> {
        if !self.users.read().await.contains_key(&payload.user_id) {
            return Err(StoreError::MissingReference("user"));
        }
        if !self.routes.read().await.iter().any(|r| r.id == payload.route_id) {
            return Err(StoreError::MissingReference("route"));
        }

        let mut favorites = self.favorites.write().await;
        if favorites
            .iter()
            .any(|f| f.user_id == payload.user_id && f.route_id == payload.route_id)
        {
            warn!(
                "⚠️ Favorito duplicado: usuario {} ya guardó la ruta {}",
                payload.user_id, payload.route_id
            );
        }

        let favorite = UserFavorite::from_insert(payload);
        favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn remove_user_favorite(&self, user_id: Uuid, route_id: Uuid) -> StoreResult<()> {
        let mut favorites = self.favorites.write().await;
        if let Some(pos) = favorites
            .iter()
            .position(|f| f.user_id == user_id && f.route_id == route_id)
        {
            favorites.remove(pos);
        }
        Ok(())
    }
}
