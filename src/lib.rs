//! Maintenance tracker
//!
//! Backend de seguimiento de mantenimiento: planilla remota con datos de
//! ejemplo como respaldo, cache de colecciones, relatorios, exportación CSV,
//! sesiones locales y asistente de IA.

pub mod cache;
pub mod clients;
pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
