//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Los servicios encapsulan operaciones que combinan la planilla, el cache
//! y las integraciones externas.

pub mod ai_assistant_service;
pub mod auth_service;
pub mod csv_export;
pub mod record_normalizer;
pub mod report_service;
pub mod sheet_service;

pub use ai_assistant_service::AiAssistantService;
pub use auth_service::AuthService;
pub use sheet_service::{MutationResult, SheetService};
