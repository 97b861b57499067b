use serde::Serialize;

use crate::cache::AppDataSnapshot;
use crate::models::{Company, Equipment, MaintenanceType, RecordView, Sector, Technician};

// Response con todas las colecciones; el histórico lleva el estado derivado
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDataResponse {
    pub equipments: Vec<Equipment>,
    pub technicians: Vec<Technician>,
    pub sectors: Vec<Sector>,
    pub companies: Vec<Company>,
    pub maintenance_types: Vec<MaintenanceType>,
    pub history: Vec<RecordView>,
    pub loading: bool,
}

impl From<AppDataSnapshot> for AppDataResponse {
    fn from(data: AppDataSnapshot) -> Self {
        Self {
            equipments: data.equipments,
            technicians: data.technicians,
            sectors: data.sectors,
            companies: data.companies,
            maintenance_types: data.maintenance_types,
            history: data.history.into_iter().map(RecordView::from).collect(),
            loading: data.loading,
        }
    }
}

// Response simple para operaciones sin datos
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
