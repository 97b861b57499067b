//! Rutas HTTP
//!
//! Cada módulo expone un `create_*_router`; `create_app` los monta, protege
//! las rutas privadas con el middleware de sesión y agrega las capas comunes.

pub mod ai_routes;
pub mod auth_routes;
pub mod data_routes;
pub mod history_routes;
pub mod reference_routes;
pub mod report_routes;

use axum::{
    http::{header, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{cors_layer, require_session};
use crate::services::csv_export::CsvFile;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Crear el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/data", data_routes::create_data_router())
        .nest("/history", history_routes::create_history_router())
        .nest("/reference", reference_routes::create_reference_router())
        .nest("/ai", ai_routes::create_ai_router())
        .merge(report_routes::create_report_router())
        .route_layer(from_fn_with_state(state.clone(), require_session));

    let api = Router::new()
        .merge(auth_routes::create_login_router())
        .merge(protected);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "maintenance_tracker",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Respuesta de descarga CSV; sin filas responde 204
pub(crate) fn csv_response(file: Option<CsvFile>) -> Result<Response, AppError> {
    let Some(file) = file else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.content,
    )
        .into_response())
}
