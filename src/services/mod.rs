//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación.
//! Los servicios validan la entrada y delegan en los repositorios.

pub mod vehicle_service;

pub use vehicle_service::VehicleService;
