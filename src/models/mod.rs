//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL y sus payloads de creación.

pub mod favorite;
pub mod route;
pub mod user;

pub use favorite::{InsertUserFavorite, UserFavorite};
pub use route::{InsertRoute, Route, RouteFilters};
pub use user::{InsertUser, User, UserFilters};
