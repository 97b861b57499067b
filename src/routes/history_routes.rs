use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::{get, put},
    Json, Router,
};
use validator::Validate;

use crate::models::{RecordInput, RecordView};
use crate::routes::csv_response;
use crate::services::csv_export::export_history;
use crate::services::report_service::{filter_history, HistoryFilter, Lookups};
use crate::services::MutationResult;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_history_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_history).post(create_record))
        .route("/export", get(export))
        .route("/:id", put(update_record).delete(delete_record))
}

async fn list_history(
    State(state): State<AppState>,
    Query(filter): Query<HistoryFilter>,
) -> Json<Vec<RecordView>> {
    let history = state.cache.history().await;
    Json(
        filter_history(&history, &filter)
            .into_iter()
            .map(RecordView::from)
            .collect(),
    )
}

async fn create_record(
    State(state): State<AppState>,
    Json(input): Json<RecordInput>,
) -> Result<Json<MutationResult>, AppError> {
    input.validate()?;
    let id = input.id.clone().unwrap_or_default();
    let result = state.cache.create_record(&input.into_record(id)).await?;
    Ok(Json(result))
}

async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<RecordInput>,
) -> Result<Json<MutationResult>, AppError> {
    input.validate()?;
    let result = state.cache.update_record(&input.into_record(id)).await?;
    Ok(Json(result))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationResult>, AppError> {
    let result = state.cache.delete_record(&id).await?;
    Ok(Json(result))
}

async fn export(State(state): State<AppState>) -> Result<Response, AppError> {
    let data = state.cache.snapshot().await;
    let lookups = Lookups::from_snapshot(&data);
    let today = chrono::Local::now().date_naive();

    csv_response(export_history(&data.history, &lookups, today))
}
