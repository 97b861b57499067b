//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! a las columnas de la planilla de manutenção.

pub mod record;
pub mod reference;
pub mod table;
pub mod user;

pub use record::{MaintenanceRecord, RecordInput, RecordView, Status};
pub use reference::{Company, Equipment, MaintenanceType, Sector, Technician};
pub use table::{ReferenceTable, TableName};
pub use user::{Session, Theme, User, UserRole};
