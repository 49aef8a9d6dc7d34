//! Sistema de manejo de errores
//!
//! Este módulo define los errores de la capa HTTP y su conversión
//! a respuestas `{ "error": "..." }` con el código de estado apropiado.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Validation { message, details } => {
                warn!("⚠️ Payload inválido: {} {:?}", message, details);
                ErrorResponse { error: message, details }
            }
            AppError::NotFound(msg) => ErrorResponse { error: msg, details: None },
            AppError::Conflict(msg) => {
                warn!("⚠️ Conflicto: {}", msg);
                ErrorResponse { error: msg, details: None }
            }
            // La causa ya quedó registrada en `internal_error`
            AppError::Internal(msg) => ErrorResponse { error: msg, details: None },
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> AppError {
    AppError::Validation {
        message: message.to_string(),
        details,
    }
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(message: &str) -> AppError {
    AppError::NotFound(message.to_string())
}

/// Registra la causa real y devuelve un error interno con mensaje genérico
pub fn internal_error(message: &str, cause: impl std::fmt::Display) -> AppError {
    error!("❌ {}: {}", message, cause);
    AppError::Internal(message.to_string())
}
