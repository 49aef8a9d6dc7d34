//! Utilidades de validación
//!
//! Convierte los cuerpos JSON de entrada en payloads tipados y validados.
//! Los campos asignados por el servidor (`id`, `createdAt`) no existen en los
//! payloads, así que serde los descarta si el cliente los envía.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::errors::{validation_error, AppResult};

/// Extraer, deserializar y validar un payload de creación.
///
/// Cualquier fallo (JSON mal formado, campo ausente, tipo incorrecto o regla
/// de validación) se convierte en `AppError::Validation` con `message` como
/// texto visible para el cliente.
pub fn parse_payload<T>(payload: Result<Json<Value>, JsonRejection>, message: &str) -> AppResult<T>
where
    T: DeserializeOwned + Validate,
{
    payload_from_value(json_body(payload, message)?, message)
}

/// Cuerpo JSON crudo; un cuerpo mal formado también es un error de validación
pub fn json_body(payload: Result<Json<Value>, JsonRejection>, message: &str) -> AppResult<Value> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| validation_error(message, Some(json!({ "body": rejection.body_text() }))))
}

/// Igual que `parse_payload` pero partiendo de un `Value` ya extraído
pub fn payload_from_value<T>(value: Value, message: &str) -> AppResult<T>
where
    T: DeserializeOwned + Validate,
{
    let payload: T = serde_json::from_value(value)
        .map_err(|e| validation_error(message, Some(json!({ "body": e.to_string() }))))?;

    payload
        .validate()
        .map_err(|errors| validation_error(message, Some(json!(errors))))?;

    Ok(payload)
}

/// Parámetros del query string; uno que no se puede decodificar es un 400
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>, message: &str) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| validation_error(message, Some(json!({ "query": rejection.body_text() }))))
}

/// Segmentos del path ya decodificados. `None` si axum no pudo extraerlos
/// (p. ej. UTF-8 inválido): ese identificador nunca fue emitido.
pub fn path_params<T>(path: Result<Path<T>, PathRejection>) -> Option<T> {
    path.ok().map(|Path(params)| params)
}

/// Los identificadores son UUID; cualquier otra cosa nunca fue emitida
pub fn parse_id(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value).ok()
}

/// Validar que ninguna etiqueta de categoría esté vacía
pub fn validate_categories(categories: &[String]) -> Result<(), ValidationError> {
    if let Some(blank) = categories.iter().find(|tag| tag.trim().is_empty()) {
        let mut error = ValidationError::new("blank_category");
        error.add_param("value".into(), blank);
        return Err(error);
    }
    Ok(())
}
