use axum::{extract::State, routing::{get, post}, Json, Router};

use crate::dto::AppDataResponse;
use crate::state::AppState;

pub fn create_data_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_data))
        .route("/refresh", post(refresh_all))
        .route("/refresh/reference", post(refresh_reference))
        .route("/refresh/history", post(refresh_history))
}

async fn get_data(State(state): State<AppState>) -> Json<AppDataResponse> {
    Json(state.cache.snapshot().await.into())
}

async fn refresh_all(State(state): State<AppState>) -> Json<AppDataResponse> {
    state.cache.load_all().await;
    Json(state.cache.snapshot().await.into())
}

async fn refresh_reference(State(state): State<AppState>) -> Json<AppDataResponse> {
    state.cache.refresh_reference_data().await;
    Json(state.cache.snapshot().await.into())
}

async fn refresh_history(State(state): State<AppState>) -> Json<AppDataResponse> {
    state.cache.refresh_history().await;
    Json(state.cache.snapshot().await.into())
}
