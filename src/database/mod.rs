//! Módulo de base de datos
//!
//! Maneja la conexión con PostgreSQL y la declaración del schema

pub mod connection;
pub mod schema;

pub use connection::DatabaseConnection;
