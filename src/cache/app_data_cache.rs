//! Cache en memoria de las colecciones
//!
//! Guarda la última foto de las cinco tablas de referencia y del histórico.
//! Cada mutación pasa por la fachada y después recarga la colección afectada.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{
    Company, Equipment, MaintenanceRecord, MaintenanceType, ReferenceTable, Sector, TableName,
    Technician,
};
use crate::services::sheet_service::{MutationResult, SheetService};
use crate::utils::errors::AppResult;

/// Foto de todas las colecciones
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDataSnapshot {
    pub equipments: Vec<Equipment>,
    pub technicians: Vec<Technician>,
    pub sectors: Vec<Sector>,
    pub companies: Vec<Company>,
    pub maintenance_types: Vec<MaintenanceType>,
    pub history: Vec<MaintenanceRecord>,
    pub loading: bool,
}

impl Default for AppDataSnapshot {
    fn default() -> Self {
        Self {
            equipments: Vec::new(),
            technicians: Vec::new(),
            sectors: Vec::new(),
            companies: Vec::new(),
            maintenance_types: Vec::new(),
            history: Vec::new(),
            loading: true,
        }
    }
}

/// Cache compartido entre handlers
#[derive(Clone)]
pub struct AppDataCache {
    service: Arc<SheetService>,
    data: Arc<RwLock<AppDataSnapshot>>,
    load_started: Arc<AtomicBool>,
}

impl AppDataCache {
    pub fn new(service: Arc<SheetService>) -> Self {
        Self {
            service,
            data: Arc::new(RwLock::new(AppDataSnapshot::default())),
            load_started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Copia de la foto actual
    pub async fn snapshot(&self) -> AppDataSnapshot {
        self.data.read().await.clone()
    }

    pub async fn history(&self) -> Vec<MaintenanceRecord> {
        self.data.read().await.history.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.data.read().await.loading
    }

    /// Cargar las seis colecciones en paralelo.
    /// Una tabla que falla conserva su foto anterior.
    pub async fn load_all(&self) {
        log::info!("🔄 Cargando todas las colecciones");
        self.load_started.store(true, Ordering::SeqCst);

        let (equipments, technicians, sectors, companies, maintenance_types, history) = futures::join!(
            self.service.fetch_equipment(),
            self.service.fetch_technicians(),
            self.service.fetch_sectors(),
            self.service.fetch_companies(),
            self.service.fetch_maintenance_types(),
            self.service.fetch_history(),
        );

        let mut data = self.data.write().await;
        store(&mut data.equipments, equipments, TableName::Equipamentos);
        store(&mut data.technicians, technicians, TableName::Tecnicos);
        store(&mut data.sectors, sectors, TableName::Setores);
        store(&mut data.companies, companies, TableName::Empresas);
        store(&mut data.maintenance_types, maintenance_types, TableName::Tipos);
        store(&mut data.history, history, TableName::Lancamentos);
        data.loading = false;

        log::info!(
            "✅ Colecciones cargadas: {} equipamientos, {} registros en el histórico",
            data.equipments.len(),
            data.history.len()
        );
    }

    /// Lanza la primera carga en segundo plano, una sola vez
    pub fn ensure_loaded(&self) {
        if self.load_started.swap(true, Ordering::SeqCst) {
            return;
        }

        let cache = self.clone();
        tokio::spawn(async move {
            cache.load_all().await;
        });
    }

    /// Recargar las cinco tablas de referencia
    pub async fn refresh_reference_data(&self) {
        let (equipments, technicians, sectors, companies, maintenance_types) = futures::join!(
            self.service.fetch_equipment(),
            self.service.fetch_technicians(),
            self.service.fetch_sectors(),
            self.service.fetch_companies(),
            self.service.fetch_maintenance_types(),
        );

        let mut data = self.data.write().await;
        store(&mut data.equipments, equipments, TableName::Equipamentos);
        store(&mut data.technicians, technicians, TableName::Tecnicos);
        store(&mut data.sectors, sectors, TableName::Setores);
        store(&mut data.companies, companies, TableName::Empresas);
        store(&mut data.maintenance_types, maintenance_types, TableName::Tipos);
    }

    pub async fn refresh_history(&self) {
        let history = self.service.fetch_history().await;
        let mut data = self.data.write().await;
        store(&mut data.history, history, TableName::Lancamentos);
    }

    /// Recargar sólo la tabla de referencia indicada
    pub async fn refresh_reference_table(&self, table: ReferenceTable) {
        match table {
            ReferenceTable::Equipment => {
                let rows = self.service.fetch_equipment().await;
                store(&mut self.data.write().await.equipments, rows, TableName::Equipamentos);
            }
            ReferenceTable::Technicians => {
                let rows = self.service.fetch_technicians().await;
                store(&mut self.data.write().await.technicians, rows, TableName::Tecnicos);
            }
            ReferenceTable::Sectors => {
                let rows = self.service.fetch_sectors().await;
                store(&mut self.data.write().await.sectors, rows, TableName::Setores);
            }
            ReferenceTable::Companies => {
                let rows = self.service.fetch_companies().await;
                store(&mut self.data.write().await.companies, rows, TableName::Empresas);
            }
            ReferenceTable::Types => {
                let rows = self.service.fetch_maintenance_types().await;
                store(&mut self.data.write().await.maintenance_types, rows, TableName::Tipos);
            }
        }
    }

    // --- Mutar y recargar ---

    pub async fn create_record(&self, record: &MaintenanceRecord) -> AppResult<MutationResult> {
        let result = self.service.save_record(record).await?;
        self.refresh_history().await;
        Ok(result)
    }

    pub async fn update_record(&self, record: &MaintenanceRecord) -> AppResult<MutationResult> {
        let result = self.service.update_history_record(record).await?;
        self.refresh_history().await;
        Ok(result)
    }

    pub async fn delete_record(&self, id: &str) -> AppResult<MutationResult> {
        let result = self.service.delete_history_record(id).await?;
        self.refresh_history().await;
        Ok(result)
    }

    pub async fn create_item(
        &self,
        table: ReferenceTable,
        item: serde_json::Value,
    ) -> AppResult<MutationResult> {
        let result = self.service.create_item(table, item).await?;
        self.refresh_reference_table(table).await;
        Ok(result)
    }

    pub async fn update_item(
        &self,
        table: ReferenceTable,
        item: serde_json::Value,
    ) -> AppResult<MutationResult> {
        let result = self.service.update_item(table, item).await?;
        self.refresh_reference_table(table).await;
        Ok(result)
    }

    pub async fn delete_item(&self, table: ReferenceTable, id: &str) -> AppResult<MutationResult> {
        let result = self.service.delete_item(table, id).await?;
        self.refresh_reference_table(table).await;
        Ok(result)
    }
}

fn store<T>(slot: &mut Vec<T>, result: AppResult<Vec<T>>, table: TableName) {
    match result {
        Ok(rows) => *slot = rows,
        Err(e) => log::error!("❌ No se pudo actualizar {}: {} (se conserva la foto anterior)", table, e),
    }
}
