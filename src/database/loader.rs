//! Carga de vehículos desde JSON
//!
//! El archivo es un array de vehículos con el mismo formato que acepta
//! POST /vehicles/batch.

use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::dto::vehicle_dto::VehicleJson;
use crate::models::Vehicle;
use crate::services::VehicleService;
use crate::utils::errors::VehicleError;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Error reading seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing seed file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error inserting seed vehicles: {0}")]
    Insert(#[from] VehicleError),
}

/// Leer el archivo y cargar todos sus vehículos en el servicio
pub async fn load_seed_file(path: &Path, service: &VehicleService) -> Result<usize, LoaderError> {
    let path_label = path.display().to_string();
    info!("📂 Cargando vehículos desde {}", path_label);

    let content = tokio::fs::read_to_string(path).await.map_err(|source| LoaderError::Io {
        path: path_label.clone(),
        source,
    })?;

    let records: Vec<VehicleJson> = serde_json::from_str(&content).map_err(|source| LoaderError::Parse {
        path: path_label.clone(),
        source,
    })?;

    let vehicles: Vec<Vehicle> = records.into_iter().map(Vehicle::from).collect();
    let total = service.add_multiple(vehicles).await?;

    info!("✅ {} vehículos cargados desde {}", total, path_label);
    Ok(total)
}
