//! Backend de la app de pasajeros: usuarios, rutas y favoritos sobre una
//! API REST mínima.

pub mod config;
pub mod controllers;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
