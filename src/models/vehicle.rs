//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle del dominio, sus dimensiones
//! y los límites que el servicio aplica sobre sus atributos.

use serde::{Deserialize, Serialize};

/// Velocidad máxima permitida (exclusiva) en km/h
pub const MAX_SPEED_UPPER_BOUND: f64 = 500.0;

/// Velocidad mínima permitida (exclusiva) en km/h
pub const MAX_SPEED_LOWER_BOUND: f64 = 0.0;

/// Dimensiones físicas del vehículo
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

/// Vehicle principal - un registro del almacén, identificado por `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    pub fabrication_year: i32,
    pub capacity: i32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    pub dimensions: Dimensions,
}

impl Vehicle {
    /// Verificar si la velocidad está dentro de (0, 500)
    pub fn is_valid_speed(speed: f64) -> bool {
        speed > MAX_SPEED_LOWER_BOUND && speed < MAX_SPEED_UPPER_BOUND
    }

    pub fn fits_dimensions(&self, min_length: f64, max_length: f64, min_width: f64, max_width: f64) -> bool {
        let Dimensions { length, width, .. } = self.dimensions;
        length >= min_length && length <= max_length && width >= min_width && width <= max_width
    }
}
