//! Módulo de datos iniciales
//!
//! Carga de vehículos desde un archivo JSON al arrancar el servidor.

pub mod loader;

pub use loader::{load_seed_file, LoaderError};
