use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Json, Router,
};

use crate::models::RecordView;
use crate::routes::csv_response;
use crate::services::csv_export::export_report;
use crate::services::report_service::{
    build_dashboard, filter_report, search_diagnostics, Dashboard, DiagnosticHit,
    DiagnosticsQuery, Lookups, ReportFilter,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/reports", get(report))
        .route("/reports/export", get(export))
        .route("/diagnostics", get(diagnostics))
}

async fn dashboard(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Json<Dashboard> {
    let data = state.cache.snapshot().await;
    let lookups = Lookups::from_snapshot(&data);
    Json(build_dashboard(&data.history, &filter, &lookups))
}

async fn report(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Json<Vec<RecordView>> {
    let data = state.cache.snapshot().await;
    let lookups = Lookups::from_snapshot(&data);
    Json(
        filter_report(&data.history, &filter, &lookups)
            .into_iter()
            .map(RecordView::from)
            .collect(),
    )
}

async fn export(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Result<Response, AppError> {
    let data = state.cache.snapshot().await;
    let lookups = Lookups::from_snapshot(&data);
    let records = filter_report(&data.history, &filter, &lookups);
    let today = chrono::Local::now().date_naive();

    csv_response(export_report(&records, &lookups, today))
}

async fn diagnostics(
    State(state): State<AppState>,
    Query(query): Query<DiagnosticsQuery>,
) -> Result<Json<Vec<DiagnosticHit>>, AppError> {
    let data = state.cache.snapshot().await;
    let lookups = Lookups::from_snapshot(&data);
    Ok(Json(search_diagnostics(&data.history, &query, &lookups)?))
}
