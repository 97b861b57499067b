//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y coerción de datos de la planilla.

pub mod coercion;
pub mod errors;
pub mod validation;

pub use errors::{AppError, AppResult};
