use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use transit_rider::config::environment::EnvironmentConfig;
use transit_rider::models::{InsertRoute, InsertUser, InsertUserFavorite, Route, User, UserFavorite};
use transit_rider::repositories::{open_store, EntityStore, StoreError, StoreResult};
use transit_rider::{create_app, AppState};

// Función helper para crear la app de test (store en memoria ya sembrado)
async fn create_test_app() -> Router {
    let config = EnvironmentConfig::default();
    let store = open_store(&config).await.unwrap();
    create_app(AppState::new(store, config))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn route_payload(number: &str) -> Value {
    json!({
        "number": number,
        "fromLocation": "Amritsar",
        "toLocation": "Jalandhar",
        "duration": "90 min",
        "distance": "80 km",
        "seats": "35 seats",
        "status": "Active",
        "category": ["highway"]
    })
}

async fn create_user(app: &Router, phone: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Rajveer Singh", "phone": phone })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn first_route_id(app: &Router) -> String {
    let (_, routes) = send(app, Method::GET, "/routes", None).await;
    routes[0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_seed_routes_after_startup() {
    let app = create_test_app().await;
    let (status, body) = send(&app, Method::GET, "/routes", None).await;

    assert_eq!(status, StatusCode::OK);
    let routes = body.as_array().unwrap();
    let numbers: Vec<&str> = routes.iter().map(|r| r["number"].as_str().unwrap()).collect();
    assert_eq!(numbers, ["Route #42", "Route #108", "Route #156"]);

    assert_eq!(routes[1]["fromLocation"], "Gurudwara Sahib");
    assert_eq!(routes[1]["toLocation"], "Golden Temple");
    assert_eq!(routes[1]["status"], "En Route");
    assert_eq!(routes[2]["category"], json!(["highway", "popular"]));
}

#[tokio::test]
async fn test_api_prefix_serves_same_routes() {
    let app = create_test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/routes", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_route_assigns_fresh_id() {
    let app = create_test_app().await;
    let (_, before) = send(&app, Method::GET, "/routes", None).await;

    let mut payload = route_payload("Route #7");
    payload["id"] = json!("client-chosen");
    let (status, created) = send(&app, Method::POST, "/routes", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_ne!(id, "client-chosen");
    assert!(before.as_array().unwrap().iter().all(|r| r["id"] != created["id"]));
    assert!(created["createdAt"].is_string());

    let (status, fetched) = send(&app, Method::GET, &format!("/routes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, after) = send(&app, Method::GET, "/routes", None).await;
    assert_eq!(after.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_test_app().await;

    let uri = format!("/routes/{}", Uuid::new_v4());
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");

    let (status, _) = send(&app, Method::GET, "/routes/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_route_payload_is_400() {
    let app = create_test_app().await;

    let mut payload = route_payload("Route #7");
    payload.as_object_mut().unwrap().remove("seats");
    let (status, body) = send(&app, Method::POST, "/routes", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid route data");

    let mut payload = route_payload("Route #7");
    payload["category"] = json!([]);
    let (status, _) = send(&app, Method::POST, "/routes", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No se escribió nada
    let (_, routes) = send(&app, Method::GET, "/routes", None).await;
    assert_eq!(routes.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = create_test_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/routes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_filter() {
    let app = create_test_app().await;

    let (status, body) = send(&app, Method::GET, "/routes?category=popular", None).await;
    assert_eq!(status, StatusCode::OK);
    let numbers: Vec<&str> = body.as_array().unwrap().iter().map(|r| r["number"].as_str().unwrap()).collect();
    assert_eq!(numbers, ["Route #42", "Route #156"]);

    let (_, body) = send(&app, Method::GET, "/routes?category=all", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&app, Method::GET, "/routes?status=Delayed", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = create_test_app().await;
    let user = create_user(&app, "+91 98765 43210").await;
    let id = user["id"].as_str().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, user);

    let (status, by_phone) = send(&app, Method::GET, "/users?phone=%2B91%2098765%2043210", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_phone["id"], user["id"]);

    let (status, body) = send(&app, Method::GET, "/users?phone=000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_duplicate_phone_is_rejected() {
    let app = create_test_app().await;
    create_user(&app, "+91 98765 43210").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Someone Else", "phone": "+91 98765 43210" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_user_payload_is_400() {
    let app = create_test_app().await;
    let (status, body) = send(&app, Method::POST, "/users", Some(json!({ "name": "No Phone" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid user data");
}

#[tokio::test]
async fn test_favorite_round_trip() {
    let app = create_test_app().await;
    let user = create_user(&app, "+91 98765 43210").await;
    let user_id = user["id"].as_str().unwrap();
    let route_id = first_route_id(&app).await;
    let favorites_uri = format!("/users/{}/favorites", user_id);

    let (status, favorite) = send(&app, Method::POST, &favorites_uri, Some(json!({ "routeId": route_id }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(favorite["userId"], user["id"]);
    assert_eq!(favorite["routeId"], route_id.as_str());

    let (status, list) = send(&app, Method::GET, &favorites_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().iter().any(|f| f["routeId"] == route_id.as_str()));

    let delete_uri = format!("{}/{}", favorites_uri, route_id);
    let (status, body) = send(&app, Method::DELETE, &delete_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, list) = send(&app, Method::GET, &favorites_uri, None).await;
    assert!(list.as_array().unwrap().iter().all(|f| f["routeId"] != route_id.as_str()));
}

#[tokio::test]
async fn test_user_id_from_path_wins() {
    let app = create_test_app().await;
    let user = create_user(&app, "1").await;
    let other = create_user(&app, "2").await;
    let route_id = first_route_id(&app).await;

    let uri = format!("/users/{}/favorites", user["id"].as_str().unwrap());
    let (status, favorite) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "routeId": route_id, "userId": other["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(favorite["userId"], user["id"]);
}

#[tokio::test]
async fn test_delete_missing_favorite_is_204() {
    let app = create_test_app().await;
    let uri = format!("/users/{}/favorites/{}", Uuid::new_v4(), Uuid::new_v4());

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, "/api/users/u/favorites/r", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_favorite_with_unknown_references_is_400() {
    let app = create_test_app().await;
    let user = create_user(&app, "+91 98765 43210").await;
    let uri = format!("/users/{}/favorites", user["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "routeId": Uuid::new_v4().to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid favorite data");

    let (status, _) = send(&app, Method::POST, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, &uri, Some(json!(["not", "an", "object"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_favorites_of_unknown_user_is_empty() {
    let app = create_test_app().await;
    let (status, body) = send(&app, Method::GET, "/users/nobody/favorites", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

/// Store que siempre falla, para comprobar los 500 genéricos
struct FailingStore;

#[async_trait::async_trait]
impl EntityStore for FailingStore {
    async fn get_user(&self, _id: Uuid) -> StoreResult<Option<User>> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn get_user_by_phone(&self, _phone: &str) -> StoreResult<Option<User>> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn create_user(&self, _user: InsertUser) -> StoreResult<User> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn get_routes(&self) -> StoreResult<Vec<Route>> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn get_route(&self, _id: Uuid) -> StoreResult<Option<Route>> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn create_route(&self, _route: InsertRoute) -> StoreResult<Route> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn get_user_favorites(&self, _user_id: Uuid) -> StoreResult<Vec<UserFavorite>> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn add_user_favorite(&self, _favorite: InsertUserFavorite) -> StoreResult<UserFavorite> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn remove_user_favorite(&self, _user_id: Uuid, _route_id: Uuid) -> StoreResult<()> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn test_store_failures_are_generic_500() {
    let app = create_app(AppState::new(Arc::new(FailingStore), EnvironmentConfig::default()));

    let (status, body) = send(&app, Method::GET, "/routes", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch routes" }));

    let (status, body) = send(&app, Method::POST, "/routes", Some(route_payload("Route #7"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to create route");

    let uri = format!("/users/{}/favorites/{}", Uuid::new_v4(), Uuid::new_v4());
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to remove favorite");

    let (status, body) = send(&app, Method::GET, &format!("/routes/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch route" }));

    let (status, body) = send(&app, Method::GET, &format!("/users/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch user" }));

    let (status, body) = send(&app, Method::GET, "/users?phone=123", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch user");

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Rajveer Singh", "phone": "+91 98765 43210" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to create user");

    let uri = format!("/users/{}/favorites", Uuid::new_v4());
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch favorites" }));

    let favorite = json!({ "routeId": Uuid::new_v4().to_string() });
    let (status, body) = send(&app, Method::POST, &uri, Some(favorite)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to add favorite");
}

#[tokio::test]
async fn test_unknown_user_is_404() {
    let app = create_test_app().await;

    let (status, body) = send(&app, Method::GET, &format!("/users/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "User not found" }));

    let (status, _) = send(&app, Method::GET, "/users/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_undecodable_path_ids_were_never_issued() {
    let app = create_test_app().await;

    let (status, body) = send(&app, Method::GET, "/routes/%FF", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));

    let (status, body) = send(&app, Method::GET, "/users/%FF", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "User not found" }));

    let (status, body) = send(&app, Method::GET, "/users/%FF/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, Method::POST, "/users/%FF/favorites", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid favorite data");

    let (status, _) = send(&app, Method::DELETE, "/users/%FF/favorites/%FF", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_malformed_query_is_400() {
    let app = create_test_app().await;

    let (status, body) = send(&app, Method::GET, "/routes?category=a&category=b", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid route filters");
    assert!(body["details"]["query"].is_string());

    let (status, body) = send(&app, Method::GET, "/users?phone=a&phone=b", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid user lookup");
}

#[tokio::test]
async fn test_user_lookup_requires_phone() {
    let app = create_test_app().await;

    let (status, body) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid user lookup");
    assert_eq!(body["details"]["phone"], "required");
}
