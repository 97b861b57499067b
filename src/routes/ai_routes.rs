use axum::{extract::State, routing::post, Json, Router};
use validator::Validate;

use crate::dto::{AiResponse, DefectAnalysisRequest, DiagnosisRequest, HistorySummaryRequest};
use crate::models::Equipment;
use crate::services::report_service::filter_history;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub fn create_ai_router() -> Router<AppState> {
    Router::new()
        .route("/defect-analysis", post(defect_analysis))
        .route("/diagnosis", post(diagnosis))
        .route("/history-summary", post(history_summary))
}

async fn find_equipment(state: &AppState, id: &str) -> Result<Equipment, AppError> {
    state
        .cache
        .snapshot()
        .await
        .equipments
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| not_found_error("Equipamento", id))
}

async fn defect_analysis(
    State(state): State<AppState>,
    Json(request): Json<DefectAnalysisRequest>,
) -> Result<Json<AiResponse>, AppError> {
    request.validate()?;
    let equipment = find_equipment(&state, &request.equipamento_id).await?;
    let text = state.ai.analyze_defect(&request.defeito, &equipment).await;
    Ok(Json(AiResponse::new(text)))
}

async fn diagnosis(
    State(state): State<AppState>,
    Json(request): Json<DiagnosisRequest>,
) -> Result<Json<AiResponse>, AppError> {
    request.validate()?;
    let equipment = find_equipment(&state, &request.equipamento_id).await?;
    let text = state
        .ai
        .improve_diagnosis(&request.diagnostico, &request.defeito, &equipment)
        .await;
    Ok(Json(AiResponse::new(text)))
}

async fn history_summary(
    State(state): State<AppState>,
    Json(request): Json<HistorySummaryRequest>,
) -> Result<Json<AiResponse>, AppError> {
    request.validate()?;
    let equipment = find_equipment(&state, &request.equipamento_id).await?;
    let history = state.cache.history().await;
    let records = filter_history(&history, &request.filter());

    let text = state.ai.history_summary(&records, &equipment).await;
    Ok(Json(AiResponse::new(text)))
}
