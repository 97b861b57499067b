//! DTOs de la API
//!
//! Requests y responses que sólo existen en la frontera HTTP.

pub mod ai_dto;
pub mod data_dto;

pub use ai_dto::*;
pub use data_dto::*;
