use std::sync::Arc;

use serde_json::{json, Value};

use crate::models::{InsertUserFavorite, UserFavorite};
use crate::repositories::{EntityStore, StoreError};
use crate::utils::errors::{internal_error, validation_error, AppError};
use crate::utils::validation::{parse_id, payload_from_value};

const INVALID_FAVORITE: &str = "Invalid favorite data";

pub struct FavoriteController {
    store: Arc<dyn EntityStore>,
}

impl FavoriteController {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<UserFavorite>, AppError> {
        // Un id que no es UUID nunca tuvo favoritos
        let Some(user_id) = parse_id(user_id) else {
            return Ok(Vec::new());
        };

        self.store
            .get_user_favorites(user_id)
            .await
            .map_err(|e| internal_error("Failed to fetch favorites", e))
    }

    /// `body` es el JSON del cliente; el `userId` del path tiene prioridad
    pub async fn add(&self, user_id: &str, body: Value) -> Result<UserFavorite, AppError> {
        let Value::Object(mut fields) = body else {
            return Err(validation_error(
                INVALID_FAVORITE,
                Some(json!({ "body": "expected a JSON object" })),
            ));
        };
        fields.insert("userId".to_string(), Value::String(user_id.to_string()));

        let payload: InsertUserFavorite = payload_from_value(Value::Object(fields), INVALID_FAVORITE)?;

        match self.store.add_user_favorite(payload).await {
            Ok(favorite) => Ok(favorite),
            Err(StoreError::MissingReference(entity)) => Err(validation_error(
                INVALID_FAVORITE,
                Some(json!({ "reference": format!("{} does not exist", entity) })),
            )),
            Err(e) => Err(internal_error("Failed to add favorite", e)),
        }
    }

    pub async fn remove(&self, user_id: &str, route_id: &str) -> Result<(), AppError> {
        let (Some(user_id), Some(route_id)) = (parse_id(user_id), parse_id(route_id)) else {
            return Ok(());
        };

        self.store
            .remove_user_favorite(user_id, route_id)
            .await
            .map_err(|e| internal_error("Failed to remove favorite", e))
    }
}
