//! Controladores
//!
//! Lógica de cada recurso entre los routers de Axum y el store.
//! Traducen los `StoreError` a `AppError` con mensajes genéricos.

pub mod favorite_controller;
pub mod route_controller;
pub mod user_controller;
