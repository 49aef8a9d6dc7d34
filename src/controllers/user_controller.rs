use std::sync::Arc;

use crate::models::{InsertUser, User};
use crate::repositories::{EntityStore, StoreError};
use crate::utils::errors::{internal_error, not_found_error, AppError};
use crate::utils::validation::parse_id;

pub struct UserController {
    store: Arc<dyn EntityStore>,
}

impl UserController {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User, AppError> {
        let Some(id) = parse_id(id) else {
            return Err(not_found_error("User not found"));
        };

        self.store
            .get_user(id)
            .await
            .map_err(|e| internal_error("Failed to fetch user", e))?
            .ok_or_else(|| not_found_error("User not found"))
    }

    /// Búsqueda usada por la pantalla de login
    pub async fn get_by_phone(&self, phone: &str) -> Result<User, AppError> {
        self.store
            .get_user_by_phone(phone)
            .await
            .map_err(|e| internal_error("Failed to fetch user", e))?
            .ok_or_else(|| not_found_error("User not found"))
    }

    pub async fn create(&self, payload: InsertUser) -> Result<User, AppError> {
        match self.store.create_user(payload).await {
            Ok(user) => Ok(user),
            Err(StoreError::Conflict { .. }) => {
                Err(AppError::Conflict("Phone number already registered".to_string()))
            }
            Err(e) => Err(internal_error("Failed to create user", e)),
        }
    }
}
