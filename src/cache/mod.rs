//! Cache
//!
//! Este módulo contiene el cache de colecciones y el almacén de sesiones.

pub mod app_data_cache;
pub mod session_store;

pub use app_data_cache::{AppDataCache, AppDataSnapshot};
pub use session_store::SessionStore;
