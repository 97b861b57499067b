use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;

use crate::models::ReferenceTable;
use crate::services::MutationResult;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_reference_router() -> Router<AppState> {
    Router::new()
        .route("/:table", get(list_items).post(create_item))
        .route("/:table/:id", put(update_item).delete(delete_item))
}

async fn list_items(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Json<Value>, AppError> {
    let table: ReferenceTable = table.parse()?;
    let data = state.cache.snapshot().await;

    let items = match table {
        ReferenceTable::Equipment => serde_json::to_value(&data.equipments)?,
        ReferenceTable::Technicians => serde_json::to_value(&data.technicians)?,
        ReferenceTable::Sectors => serde_json::to_value(&data.sectors)?,
        ReferenceTable::Companies => serde_json::to_value(&data.companies)?,
        ReferenceTable::Types => serde_json::to_value(&data.maintenance_types)?,
    };
    Ok(Json(items))
}

async fn create_item(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Json(item): Json<Value>,
) -> Result<Json<MutationResult>, AppError> {
    let table: ReferenceTable = table.parse()?;
    let result = state.cache.create_item(table, item).await?;
    Ok(Json(result))
}

async fn update_item(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
    Json(item): Json<Value>,
) -> Result<Json<MutationResult>, AppError> {
    let table: ReferenceTable = table.parse()?;
    let Value::Object(mut fields) = item else {
        return Err(bad_request_error("O item deve ser um objeto JSON"));
    };
    fields.insert("id".to_string(), Value::String(id));

    let result = state.cache.update_item(table, Value::Object(fields)).await?;
    Ok(Json(result))
}

async fn delete_item(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> Result<Json<MutationResult>, AppError> {
    let table: ReferenceTable = table.parse()?;
    let result = state.cache.delete_item(table, &id).await?;
    Ok(Json(result))
}
