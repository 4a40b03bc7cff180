use serde::{Deserialize, Serialize};

use crate::models::{Dimensions, Vehicle};

// Representación JSON plana de un vehículo (request y response)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleJson {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    pub year: i32,
    pub passengers: i32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    pub height: f64,
    #[serde(default)]
    pub length: f64,
    pub width: f64,
}

// Request para actualizar la velocidad máxima
#[derive(Debug, Deserialize)]
pub struct UpdateSpeedRequest {
    pub max_speed: f64,
}

// Request para actualizar el tipo de combustible
#[derive(Debug, Deserialize)]
pub struct UpdateFuelRequest {
    pub fuel_type: String,
}

// Query de GET /vehicles/dimensions?length=min-max&width=min-max
#[derive(Debug, Default, Deserialize)]
pub struct DimensionsQuery {
    pub length: Option<String>,
    pub width: Option<String>,
}

// Query de GET /vehicles/weight?min=&max=
#[derive(Debug, Default, Deserialize)]
pub struct WeightQuery {
    #[serde(alias = "min_weight")]
    pub min: Option<String>,
    #[serde(alias = "max_weight")]
    pub max: Option<String>,
}

// Response de POST /vehicles/batch
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchCreatedResponse {
    pub created: usize,
}

impl From<Vehicle> for VehicleJson {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            registration: vehicle.registration,
            color: vehicle.color,
            year: vehicle.fabrication_year,
            passengers: vehicle.capacity,
            max_speed: vehicle.max_speed,
            fuel_type: vehicle.fuel_type,
            transmission: vehicle.transmission,
            weight: vehicle.weight,
            height: vehicle.dimensions.height,
            length: vehicle.dimensions.length,
            width: vehicle.dimensions.width,
        }
    }
}

impl From<VehicleJson> for Vehicle {
    fn from(body: VehicleJson) -> Self {
        Self {
            id: body.id,
            brand: body.brand,
            model: body.model,
            registration: body.registration,
            color: body.color,
            fabrication_year: body.year,
            capacity: body.passengers,
            max_speed: body.max_speed,
            fuel_type: body.fuel_type,
            transmission: body.transmission,
            weight: body.weight,
            dimensions: Dimensions {
                height: body.height,
                length: body.length,
                width: body.width,
            },
        }
    }
}
