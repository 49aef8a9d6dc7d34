//! Repositorios
//!
//! `EntityStore` es el contrato de persistencia de usuarios, rutas y
//! favoritos. Hay dos implementaciones intercambiables: `MemoryStore`
//! (transitoria) y `PostgresStore` (persistente). Se elige una al arrancar
//! y se inyecta en el estado de Axum.

pub mod memory_store;
pub mod postgres_store;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::environment::{EnvironmentConfig, StorageBackend};
use crate::config::ConfigError;
use crate::database::DatabaseConnection;
use crate::models::{InsertRoute, InsertUser, InsertUserFavorite, Route, User, UserFavorite};

pub use memory_store::MemoryStore;
pub use postgres_store::PostgresStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} with {field} '{value}' already exists")]
    Conflict {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("referenced {0} does not exist")]
    MissingReference(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn get_user_by_phone(&self, phone: &str) -> StoreResult<Option<User>>;
    /// Falla con `Conflict` si el teléfono ya está registrado
    async fn create_user(&self, user: InsertUser) -> StoreResult<User>;

    async fn get_routes(&self) -> StoreResult<Vec<Route>>;
    async fn get_route(&self, id: Uuid) -> StoreResult<Option<Route>>;
    async fn create_route(&self, route: InsertRoute) -> StoreResult<Route>;

    async fn get_user_favorites(&self, user_id: Uuid) -> StoreResult<Vec<UserFavorite>>;
    /// Falla con `MissingReference` si el usuario o la ruta no existen.
    /// No deduplica: el mismo par usuario/ruta puede guardarse dos veces.
    async fn add_user_favorite(&self, favorite: InsertUserFavorite) -> StoreResult<UserFavorite>;
    /// Borra como mucho una fila (la más antigua); no-op si no hay ninguna
    async fn remove_user_favorite(&self, user_id: Uuid, route_id: Uuid) -> StoreResult<()>;
}

#[derive(Error, Debug)]
pub enum StoreInitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Construir el store configurado y sembrar las rutas de demo
pub async fn open_store(config: &EnvironmentConfig) -> Result<Arc<dyn EntityStore>, StoreInitError> {
    let (store, seeded): (Arc<dyn EntityStore>, usize) = match config.storage_backend {
        StorageBackend::Memory => {
            let store = MemoryStore::new();
            let seeded = seed::seed_routes(&store).await?;
            (Arc::new(store), seeded)
        }
        StorageBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let connection = DatabaseConnection::new(database).await?;
            let store = PostgresStore::new(connection.pool().clone());
            let seeded = store.seed_routes_locked().await?;
            (Arc::new(store), seeded)
        }
    };

    info!("🚌 Store '{}' listo ({} rutas de demo sembradas)", config.storage_backend, seeded);
    Ok(store)
}
