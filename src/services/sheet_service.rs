//! Servicio de datos de la planilla
//!
//! Lecturas tipadas de cada pestaña y la fachada de mutaciones (create /
//! update / delete). La fachada nunca refresca el cache: eso lo decide quien
//! la llama, después de esperar la escritura.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::clients::mock_data::mock_rows;
use crate::clients::{SheetAction, SheetClient, WriteOutcome};
use crate::models::{
    Company, Equipment, MaintenanceRecord, MaintenanceType, ReferenceTable, Sector, TableName,
    Technician,
};
use crate::services::record_normalizer::normalize_history;
use crate::utils::coercion::coerce_string;
use crate::utils::errors::{bad_request_error, AppResult};

/// Resultado de una mutación enviada a la planilla
#[derive(Debug, Clone, Serialize)]
pub struct MutationResult {
    pub success: bool,
    pub id: String,
    #[serde(flatten)]
    pub outcome: WriteOutcome,
}

impl MutationResult {
    fn new(id: String, outcome: WriteOutcome) -> Self {
        Self {
            success: true,
            id,
            outcome,
        }
    }
}

/// Servicio de la planilla
pub struct SheetService {
    client: SheetClient,
}

impl SheetService {
    pub fn new(client: SheetClient) -> Self {
        Self { client }
    }

    // --- Lecturas ---

    /// Leer una pestaña y convertir cada fila al tipo pedido.
    /// Una respuesta que no es array se trata como pestaña vacía; si alguna
    /// fila no se puede interpretar se usan los datos de ejemplo de la pestaña.
    pub async fn fetch_rows<T: DeserializeOwned>(&self, table: TableName) -> AppResult<Vec<T>> {
        let payload = self.client.read(table).await;
        decode_rows(table, payload)
    }

    pub async fn fetch_equipment(&self) -> AppResult<Vec<Equipment>> {
        self.fetch_rows(TableName::Equipamentos).await
    }

    pub async fn fetch_technicians(&self) -> AppResult<Vec<Technician>> {
        self.fetch_rows(TableName::Tecnicos).await
    }

    pub async fn fetch_sectors(&self) -> AppResult<Vec<Sector>> {
        self.fetch_rows(TableName::Setores).await
    }

    pub async fn fetch_companies(&self) -> AppResult<Vec<Company>> {
        self.fetch_rows(TableName::Empresas).await
    }

    pub async fn fetch_maintenance_types(&self) -> AppResult<Vec<MaintenanceType>> {
        self.fetch_rows(TableName::Tipos).await
    }

    /// Histórico normalizado y ordenado (más reciente primero)
    pub async fn fetch_history(&self) -> AppResult<Vec<MaintenanceRecord>> {
        let payload = self.client.read(TableName::Lancamentos).await;
        Ok(normalize_history(&payload))
    }

    // --- Fachada de cadastros ---

    /// Crear un item de referencia. Si no trae id se genera un UUID.
    pub async fn create_item(&self, table: ReferenceTable, item: Value) -> AppResult<MutationResult> {
        let (id, item) = ensure_id(item)?;
        let outcome = self
            .client
            .write(SheetAction::Create, table.table_name(), Some(&item), None)
            .await;
        Ok(MutationResult::new(id, outcome))
    }

    pub async fn update_item(&self, table: ReferenceTable, item: Value) -> AppResult<MutationResult> {
        let id = required_id(&item)?;
        let outcome = self
            .client
            .write(SheetAction::Update, table.table_name(), Some(&item), None)
            .await;
        Ok(MutationResult::new(id, outcome))
    }

    pub async fn delete_item(&self, table: ReferenceTable, id: &str) -> AppResult<MutationResult> {
        if id.trim().is_empty() {
            return Err(bad_request_error("Id obrigatório para excluir"));
        }
        let outcome = self
            .client
            .write(SheetAction::Delete, table.table_name(), None, Some(id))
            .await;
        Ok(MutationResult::new(id.to_string(), outcome))
    }

    // --- Fachada del histórico ---

    pub async fn save_record(&self, record: &MaintenanceRecord) -> AppResult<MutationResult> {
        let (id, data) = ensure_id(serde_json::to_value(record)?)?;
        let outcome = self
            .client
            .write(SheetAction::Create, TableName::Lancamentos, Some(&data), None)
            .await;
        Ok(MutationResult::new(id, outcome))
    }

    pub async fn update_history_record(&self, record: &MaintenanceRecord) -> AppResult<MutationResult> {
        let data = serde_json::to_value(record)?;
        let id = required_id(&data)?;
        let outcome = self
            .client
            .write(SheetAction::Update, TableName::Lancamentos, Some(&data), None)
            .await;
        Ok(MutationResult::new(id, outcome))
    }

    pub async fn delete_history_record(&self, id: &str) -> AppResult<MutationResult> {
        if id.trim().is_empty() {
            return Err(bad_request_error("Id obrigatório para excluir"));
        }
        let outcome = self
            .client
            .write(SheetAction::Delete, TableName::Lancamentos, None, Some(id))
            .await;
        Ok(MutationResult::new(id.to_string(), outcome))
    }
}

fn decode_rows<T: DeserializeOwned>(table: TableName, payload: Value) -> AppResult<Vec<T>> {
    match payload {
        Value::Array(rows) => match parse_rows(rows) {
            Ok(items) => Ok(items),
            Err(e) => {
                log::error!("❌ Filas inválidas en la pestaña {}: {}, se usan datos de ejemplo", table, e);
                match mock_rows(table) {
                    Value::Array(rows) => Ok(parse_rows(rows)?),
                    _ => Ok(Vec::new()),
                }
            }
        },
        _ => {
            log::warn!("⚠️ Pestaña {} no devolvió un array, se usa lista vacía", table);
            Ok(Vec::new())
        }
    }
}

fn parse_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, serde_json::Error> {
    rows.into_iter().map(serde_json::from_value).collect()
}

/// Garantizar que el item tenga id, generándolo si falta o está vacío
fn ensure_id(item: Value) -> AppResult<(String, Value)> {
    let Value::Object(mut fields) = item else {
        return Err(bad_request_error("O item deve ser um objeto JSON"));
    };

    let current = fields.get("id").map(coerce_string).unwrap_or_default();
    let id = if current.trim().is_empty() {
        Uuid::new_v4().to_string()
    } else {
        current
    };
    fields.insert("id".to_string(), Value::String(id.clone()));

    Ok((id, Value::Object(fields)))
}

fn required_id(item: &Value) -> AppResult<String> {
    if !item.is_object() {
        return Err(bad_request_error("O item deve ser um objeto JSON"));
    }
    let id = item.get("id").map(coerce_string).unwrap_or_default();
    if id.trim().is_empty() {
        return Err(bad_request_error("Id obrigatório para atualizar"));
    }
    Ok(id)
}
