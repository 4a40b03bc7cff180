//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio que maneja el almacén
//! en memoria.

pub mod vehicle;

pub use vehicle::{Dimensions, Vehicle};
