use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::favorite_controller::FavoriteController;
use crate::controllers::user_controller::UserController;
use crate::models::{InsertUser, User, UserFavorite, UserFilters};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppError};
use crate::utils::validation::{json_body, parse_payload, path_params, query_params};

const INVALID_LOOKUP: &str = "Invalid user lookup";

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(find_user).post(create_user))
        .route("/users/:id", get(get_user))
        .route("/users/:id/favorites", get(list_favorites).post(add_favorite))
        .route("/users/:id/favorites/:route_id", delete(remove_favorite))
}

/// `GET /users?phone=...`
async fn find_user(
    State(state): State<AppState>,
    filters: Result<Query<UserFilters>, QueryRejection>,
) -> Result<Json<User>, AppError> {
    let filters = query_params(filters, INVALID_LOOKUP)?;
    let Some(phone) = filters.phone else {
        return Err(validation_error(INVALID_LOOKUP, Some(json!({ "phone": "required" }))));
    };
    let controller = UserController::new(state.store.clone());
    let user = controller.get_by_phone(&phone).await?;
    Ok(Json(user))
}

async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let Some(id) = path_params(id) else {
        return Err(not_found_error("User not found"));
    };
    let controller = UserController::new(state.store.clone());
    let user = controller.get_by_id(&id).await?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let request: InsertUser = parse_payload(payload, "Invalid user data")?;
    let controller = UserController::new(state.store.clone());
    let user = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_favorites(
    State(state): State<AppState>,
    user_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<UserFavorite>>, AppError> {
    let Some(user_id) = path_params(user_id) else {
        return Ok(Json(Vec::new()));
    };
    let controller = FavoriteController::new(state.store.clone());
    let favorites = controller.list(&user_id).await?;
    Ok(Json(favorites))
}

async fn add_favorite(
    State(state): State<AppState>,
    user_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<UserFavorite>), AppError> {
    let Some(user_id) = path_params(user_id) else {
        return Err(validation_error(
            "Invalid favorite data",
            Some(json!({ "userId": "not a valid user id" })),
        ));
    };
    let body = json_body(payload, "Invalid favorite data")?;
    let controller = FavoriteController::new(state.store.clone());
    let favorite = controller.add(&user_id, body).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

async fn remove_favorite(
    State(state): State<AppState>,
    ids: Result<Path<(String, String)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    // Ids no decodificables nunca fueron emitidos: no hay nada que borrar
    let Some((user_id, route_id)) = path_params(ids) else {
        return Ok(StatusCode::NO_CONTENT);
    };
    let controller = FavoriteController::new(state.store.clone());
    controller.remove(&user_id, &route_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
