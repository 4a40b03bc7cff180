//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar cuerpos JSON crudos
//! y convertir parámetros de query/path a tipos del dominio.

use serde_json::{Map, Value};
use validator::ValidationError;

use crate::utils::errors::{bad_request_error, validation_error, AppError};

/// Claves que debe traer todo vehículo en POST /vehicles y /vehicles/batch.
/// `length` no está en la lista y toma 0.0 si falta.
pub const REQUIRED_VEHICLE_KEYS: [&str; 13] = [
    "id",
    "brand",
    "model",
    "registration",
    "color",
    "year",
    "passengers",
    "max_speed",
    "fuel_type",
    "transmission",
    "weight",
    "height",
    "width",
];

/// Verificar que el objeto JSON contenga todas las claves requeridas.
/// Devuelve la primera clave que falte, en el orden de la lista.
pub fn validate_key_existence(body: &Map<String, Value>) -> Result<(), AppError> {
    match REQUIRED_VEHICLE_KEYS.iter().find(|key| !body.contains_key(**key)) {
        Some(key) => Err(validation_error(*key, format!("key {} not found", key))),
        None => Ok(()),
    }
}

/// Interpretar un valor JSON crudo como objeto
pub fn as_json_object(value: &Value) -> Result<&Map<String, Value>, AppError> {
    value
        .as_object()
        .ok_or_else(|| bad_request_error("invalid request body: expected a JSON object"))
}

/// Parsear un token de rango con el formato `min-max`
pub fn parse_range_token(value: &str) -> Result<(f64, f64), ValidationError> {
    let invalid = || {
        let mut error = ValidationError::new("range_token");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"min-max".to_string());
        error
    };

    let token = value.trim();
    // El separador no puede ser un signo inicial ni el de un exponente
    let separator = token
        .char_indices()
        .zip(token.chars().skip(1))
        .find(|&((_, prev), next)| next == '-' && !matches!(prev, 'e' | 'E'))
        .map(|((prev_idx, prev), _)| prev_idx + prev.len_utf8())
        .ok_or_else(invalid)?;
    let (min, max) = (&token[..separator], &token[separator + 1..]);
    let min = min.trim().parse::<f64>().map_err(|_| invalid())?;
    let max = max.trim().parse::<f64>().map_err(|_| invalid())?;

    if !min.is_finite() || !max.is_finite() {
        return Err(invalid());
    }

    Ok((min, max))
}

/// Parsear un parámetro de rango obligatorio de la query
pub fn require_range_param(name: &str, value: Option<&str>) -> Result<(f64, f64), AppError> {
    let raw = value.ok_or_else(|| AppError::BadRequest(format!("missing query parameter '{}'", name)))?;
    parse_range_token(raw).map_err(|_| {
        AppError::BadRequest(format!("invalid query parameter '{}': expected min-max, got '{}'", name, raw))
    })
}

/// Parsear un parámetro numérico de path
pub fn parse_path_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::BadRequest(format!("invalid {}: '{}'", name, raw)))
}
