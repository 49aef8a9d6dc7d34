//! Routers de la API
//!
//! Todas las rutas se sirven en la raíz y bajo `/api`, que es el prefijo
//! que usa la app web.

pub mod route_routes;
pub mod user_routes;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router de recursos sin estado aplicado
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .merge(route_routes::create_route_router())
        .merge(user_routes::create_user_router())
}

/// Aplicación completa con middleware y estado
pub fn create_app(state: AppState) -> Router {
    let api = create_api_router();
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "storage": state.config.storage_backend.to_string(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
