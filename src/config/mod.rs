//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de variables de entorno
//! de la planilla remota, del asistente de IA y del servidor.

pub mod environment;

pub use environment::*;
