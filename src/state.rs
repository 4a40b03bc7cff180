//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::VehicleController;
use crate::repositories::{InMemoryVehicleRepository, VehicleRepository};
use crate::services::VehicleService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicle_service: VehicleService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, repository: Arc<dyn VehicleRepository>) -> Self {
        Self {
            config,
            vehicle_service: VehicleService::new(repository),
        }
    }

    /// Estado con un almacén vacío en memoria
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(config, Arc::new(InMemoryVehicleRepository::new()))
    }

    pub fn vehicle_controller(&self) -> VehicleController {
        VehicleController::new(self.vehicle_service.clone())
    }
}
