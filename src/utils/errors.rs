//! Sistema de manejo de errores
//!
//! Este módulo define los errores del dominio de vehículos, los errores
//! de la capa HTTP y su conversión a respuestas apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Errores del dominio de vehículos que devuelven repositorio y servicio
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VehicleError {
    #[error("Vehicle with id '{0}' already exists")]
    AlreadyExists(i64),

    #[error("Vehicle with id '{0}' not found")]
    NotFound(i64),

    #[error("Vehicles not found with those parameters")]
    VehiclesNotFound,

    #[error("Invalid max speed {0}: must be greater than 0 and lower than 500")]
    InvalidSpeed(f64),

    #[error("Invalid fuel type '{0}'")]
    InvalidFuelType(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl From<VehicleError> for AppError {
    fn from(err: VehicleError) -> Self {
        match err {
            VehicleError::AlreadyExists(_) => AppError::Conflict(err.to_string()),
            VehicleError::NotFound(_) | VehicleError::VehiclesNotFound => {
                AppError::NotFound(err.to_string())
            }
            VehicleError::InvalidSpeed(_)
            | VehicleError::InvalidFuelType(_)
            | VehicleError::InvalidRange(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: validation_message(&e),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Primer mensaje legible de un conjunto de errores de validación
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "The provided data is invalid".to_string())
}

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: String) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("required");
    error.add_param("field".into(), &field);
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_error_status_mapping() {
        let cases = vec![
            (VehicleError::AlreadyExists(1), StatusCode::CONFLICT),
            (VehicleError::NotFound(1), StatusCode::NOT_FOUND),
            (VehicleError::VehiclesNotFound, StatusCode::NOT_FOUND),
            (VehicleError::InvalidSpeed(600.0), StatusCode::BAD_REQUEST),
            (VehicleError::InvalidFuelType(String::new()), StatusCode::BAD_REQUEST),
            (VehicleError::InvalidRange("5 > 1".to_string()), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_validation_error_message() {
        let err = validation_error("brand", "key brand not found".to_string());
        match &err {
            AppError::Validation(e) => assert_eq!(validation_message(e), "key brand not found"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
