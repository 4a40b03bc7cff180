use serde_json::Value;
use std::collections::BTreeMap;

use crate::dto::vehicle_dto::{BatchCreatedResponse, DimensionsQuery, VehicleJson, WeightQuery};
use crate::dto::ApiResponse;
use crate::models::Vehicle;
use crate::services::VehicleService;
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::{as_json_object, require_range_param, validate_key_existence};

pub struct VehicleController {
    service: VehicleService,
}

impl VehicleController {
    pub fn new(service: VehicleService) -> Self {
        Self { service }
    }

    pub async fn list_all(&self) -> Result<ApiResponse<BTreeMap<i64, VehicleJson>>, AppError> {
        let vehicles = self.service.find_all().await;

        let response = vehicles
            .into_iter()
            .map(|(id, v)| (id, VehicleJson::from(v)))
            .collect();

        Ok(ApiResponse::success(response))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ApiResponse<VehicleJson>, AppError> {
        let vehicle = self.service.find_by_id(id).await?;
        Ok(ApiResponse::success(vehicle.into()))
    }

    pub async fn create(&self, body: Value) -> Result<ApiResponse<VehicleJson>, AppError> {
        let vehicle = decode_vehicle(&body)?;
        let created = self.service.add(vehicle).await?;

        Ok(ApiResponse::success_with_message(
            created.into(),
            "Vehicle created successfully".to_string(),
        ))
    }

    pub async fn create_batch(&self, body: Value) -> Result<ApiResponse<BatchCreatedResponse>, AppError> {
        let items = body
            .as_array()
            .ok_or_else(|| bad_request_error("invalid request body: expected a JSON array of vehicles"))?;

        let vehicles = items.iter().map(decode_vehicle).collect::<Result<Vec<_>, _>>()?;
        let created = self.service.add_multiple(vehicles).await?;

        Ok(ApiResponse::success_with_message(
            BatchCreatedResponse { created },
            "Vehicles created successfully".to_string(),
        ))
    }

    pub async fn search_by_color_and_year(&self, color: &str, year: i32) -> Result<ApiResponse<Vec<VehicleJson>>, AppError> {
        let vehicles = self.service.search_by_color_and_year(color, year).await?;
        Ok(found(vehicles))
    }

    pub async fn search_by_brand(
        &self,
        brand: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<ApiResponse<Vec<VehicleJson>>, AppError> {
        let vehicles = self.service.search_by_brand(brand, start_year, end_year).await?;
        Ok(found(vehicles))
    }

    pub async fn average_speed_by_brand(&self, brand: &str) -> Result<ApiResponse<f64>, AppError> {
        let average = self.service.get_average_speed_by_brand(brand).await?;
        Ok(ApiResponse::success_with_message(
            average,
            "Average speed found successfully".to_string(),
        ))
    }

    pub async fn average_capacity_by_brand(&self, brand: &str) -> Result<ApiResponse<f64>, AppError> {
        let average = self.service.get_average_capacity_by_brand(brand).await?;
        Ok(ApiResponse::success_with_message(
            average,
            "Average capacity found successfully".to_string(),
        ))
    }

    pub async fn by_fuel_type(&self, fuel_type: &str) -> Result<ApiResponse<Vec<VehicleJson>>, AppError> {
        let vehicles = self.service.get_vehicles_by_fuel_type(fuel_type).await?;
        Ok(found(vehicles))
    }

    pub async fn by_transmission(&self, transmission: &str) -> Result<ApiResponse<Vec<VehicleJson>>, AppError> {
        let vehicles = self.service.get_vehicles_by_transmission(transmission).await?;
        Ok(found(vehicles))
    }

    pub async fn by_dimensions(&self, query: DimensionsQuery) -> Result<ApiResponse<Vec<VehicleJson>>, AppError> {
        let length = require_range_param("length", query.length.as_deref())?;
        let width = require_range_param("width", query.width.as_deref())?;

        let vehicles = self.service.get_vehicles_by_dimensions(length, width).await?;
        Ok(found(vehicles))
    }

    pub async fn by_weight(&self, query: WeightQuery) -> Result<ApiResponse<Vec<VehicleJson>>, AppError> {
        let min = parse_query_number("min", query.min.as_deref())?;
        let max = parse_query_number("max", query.max.as_deref())?;

        let vehicles = self.service.get_vehicles_by_weight(min, max).await?;
        Ok(found(vehicles))
    }

    pub async fn update_speed(&self, id: i64, max_speed: f64) -> Result<ApiResponse<VehicleJson>, AppError> {
        let vehicle = self.service.update_max_speed_by_id(id, max_speed).await?;
        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle max speed updated successfully".to_string(),
        ))
    }

    pub async fn update_fuel(&self, id: i64, fuel_type: &str) -> Result<ApiResponse<VehicleJson>, AppError> {
        let vehicle = self.service.update_fuel_type_by_id(id, fuel_type).await?;
        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle fuel type updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        self.service.delete_by_id(id).await?;
        Ok(ApiResponse::message(format!("Vehicle {} deleted successfully", id)))
    }
}

/// Checklist de claves sobre el JSON crudo y luego decodificación tipada
fn decode_vehicle(raw: &Value) -> Result<Vehicle, AppError> {
    let object = as_json_object(raw)?;
    validate_key_existence(object)?;

    let body: VehicleJson = serde_json::from_value(raw.clone())
        .map_err(|e| AppError::BadRequest(format!("invalid request body: {}", e)))?;

    Ok(body.into())
}

fn parse_query_number(name: &str, raw: Option<&str>) -> Result<f64, AppError> {
    let raw = raw.ok_or_else(|| AppError::BadRequest(format!("missing query parameter '{}'", name)))?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| AppError::BadRequest(format!("invalid query parameter '{}': '{}'", name, raw)))
}

fn found(vehicles: Vec<Vehicle>) -> ApiResponse<Vec<VehicleJson>> {
    ApiResponse::success_with_message(
        vehicles.into_iter().map(VehicleJson::from).collect(),
        "Vehicles found successfully".to_string(),
    )
}
