use axum::{
    extract::State,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Serialize;

use crate::middleware::CurrentSession;
use crate::models::user::{LoginRequest, LoginResponse, ThemeRequest};
use crate::models::{Theme, User};
use crate::state::AppState;
use crate::dto::SuccessResponse;
use crate::utils::errors::AppError;

#[derive(Debug, Serialize)]
struct MeResponse {
    user: User,
    theme: Theme,
}

/// Rutas públicas de autenticación
pub fn create_login_router() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// Rutas de autenticación que exigen sesión
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/theme", put(update_theme))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state.auth.login(&request).await?;
    state.cache.ensure_loaded();

    Ok(Json(LoginResponse {
        success: true,
        token: session.token,
        user: session.user,
        theme: session.theme,
    }))
}

async fn logout(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.auth.logout(&session.token).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn me(Extension(CurrentSession(session)): Extension<CurrentSession>) -> Json<MeResponse> {
    Json(MeResponse {
        user: session.user,
        theme: session.theme,
    })
}

async fn update_theme(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Json(request): Json<ThemeRequest>,
) -> Result<Json<MeResponse>, AppError> {
    let updated = state.sessions.set_theme(&session.token, request.theme).await?;
    Ok(Json(MeResponse {
        user: updated.user,
        theme: updated.theme,
    }))
}
