use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::controllers::route_controller::RouteController;
use crate::models::{InsertRoute, Route, RouteFilters};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{parse_payload, path_params, query_params};

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/routes", get(list_routes).post(create_route))
        .route("/routes/:id", get(get_route))
}

async fn list_routes(
    State(state): State<AppState>,
    filters: Result<Query<RouteFilters>, QueryRejection>,
) -> Result<Json<Vec<Route>>, AppError> {
    let filters = query_params(filters, "Invalid route filters")?;
    let controller = RouteController::new(state.store.clone());
    let routes = controller.list(&filters).await?;
    Ok(Json(routes))
}

async fn get_route(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Route>, AppError> {
    let Some(id) = path_params(id) else {
        return Err(not_found_error("Route not found"));
    };
    let controller = RouteController::new(state.store.clone());
    let route = controller.get_by_id(&id).await?;
    Ok(Json(route))
}

async fn create_route(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    let request: InsertRoute = parse_payload(payload, "Invalid route data")?;
    let controller = RouteController::new(state.store.clone());
    let route = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(route)))
}
