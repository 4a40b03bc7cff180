//! Servicio de vehículos
//!
//! Capa de negocio entre el controller y el almacén: valida velocidades,
//! tipos de combustible y rangos antes de delegar en el repositorio.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::Vehicle;
use crate::repositories::VehicleRepository;
use crate::utils::errors::VehicleError;

pub type ServiceResult<T> = Result<T, VehicleError>;

#[derive(Clone)]
pub struct VehicleService {
    repository: Arc<dyn VehicleRepository>,
}

impl VehicleService {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_all(&self) -> HashMap<i64, Vehicle> {
        self.repository.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> ServiceResult<Vehicle> {
        self.repository.find_by_id(id).await
    }

    pub async fn count(&self) -> usize {
        self.repository.count().await
    }

    pub async fn add(&self, vehicle: Vehicle) -> ServiceResult<Vehicle> {
        validate_speed(vehicle.max_speed)?;

        self.repository.add(vehicle.clone()).await?;
        info!("🚗 Vehículo {} creado ({} {})", vehicle.id, vehicle.brand, vehicle.model);
        Ok(vehicle)
    }

    pub async fn add_multiple(&self, vehicles: Vec<Vehicle>) -> ServiceResult<usize> {
        for vehicle in &vehicles {
            validate_speed(vehicle.max_speed)?;
        }

        let total = vehicles.len();
        self.repository.add_multiple(vehicles).await?;
        info!("🚗 Lote de {} vehículos creado", total);
        Ok(total)
    }

    pub async fn search_by_color_and_year(&self, color: &str, year: i32) -> ServiceResult<Vec<Vehicle>> {
        self.repository.search_by_color_and_year(color, year).await
    }

    pub async fn search_by_brand(&self, brand: &str, start_year: i32, end_year: i32) -> ServiceResult<Vec<Vehicle>> {
        if start_year > end_year {
            return Err(VehicleError::InvalidRange(format!(
                "start year {} is greater than end year {}",
                start_year, end_year
            )));
        }

        self.repository.search_by_brand(brand, start_year, end_year).await
    }

    pub async fn get_average_speed_by_brand(&self, brand: &str) -> ServiceResult<f64> {
        self.repository.get_average_speed_by_brand(brand).await
    }

    pub async fn get_average_capacity_by_brand(&self, brand: &str) -> ServiceResult<f64> {
        self.repository.get_average_capacity_by_brand(brand).await
    }

    pub async fn get_vehicles_by_fuel_type(&self, fuel_type: &str) -> ServiceResult<Vec<Vehicle>> {
        self.repository.get_vehicles_by_fuel_type(fuel_type).await
    }

    pub async fn get_vehicles_by_transmission(&self, transmission: &str) -> ServiceResult<Vec<Vehicle>> {
        self.repository.get_vehicles_by_transmission(transmission).await
    }

    pub async fn get_vehicles_by_dimensions(
        &self,
        (min_length, max_length): (f64, f64),
        (min_width, max_width): (f64, f64),
    ) -> ServiceResult<Vec<Vehicle>> {
        validate_range("length", min_length, max_length)?;
        validate_range("width", min_width, max_width)?;

        self.repository
            .get_vehicles_by_dimensions(min_length, max_length, min_width, max_width)
            .await
    }

    pub async fn get_vehicles_by_weight(&self, min_weight: f64, max_weight: f64) -> ServiceResult<Vec<Vehicle>> {
        validate_range("weight", min_weight, max_weight)?;

        self.repository.get_vehicles_by_weight(min_weight, max_weight).await
    }

    pub async fn update_max_speed_by_id(&self, id: i64, max_speed: f64) -> ServiceResult<Vehicle> {
        validate_speed(max_speed)?;

        let updated = self.repository.update_max_speed_by_id(id, max_speed).await?;
        info!("⚡ Velocidad máxima del vehículo {} actualizada a {}", id, max_speed);
        Ok(updated)
    }

    pub async fn update_fuel_type_by_id(&self, id: i64, fuel_type: &str) -> ServiceResult<Vehicle> {
        let fuel_type = fuel_type.trim();
        if fuel_type.is_empty() {
            warn!("⚠️ Tipo de combustible vacío para el vehículo {}", id);
            return Err(VehicleError::InvalidFuelType(fuel_type.to_string()));
        }

        let updated = self.repository.update_fuel_type_by_id(id, fuel_type).await?;
        info!("⛽ Combustible del vehículo {} actualizado a '{}'", id, fuel_type);
        Ok(updated)
    }

    pub async fn delete_by_id(&self, id: i64) -> ServiceResult<()> {
        self.repository.delete_by_id(id).await?;
        info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }
}

fn validate_speed(speed: f64) -> ServiceResult<()> {
    if Vehicle::is_valid_speed(speed) {
        Ok(())
    } else {
        Err(VehicleError::InvalidSpeed(speed))
    }
}

fn validate_range(name: &str, min: f64, max: f64) -> ServiceResult<()> {
    if min > max {
        return Err(VehicleError::InvalidRange(format!(
            "{} minimum {} is greater than maximum {}",
            name, min, max
        )));
    }
    Ok(())
}
