//! Middleware de sesión
//!
//! Extrae el token Bearer, busca la sesión y la inyecta en las extensions de
//! la request como `CurrentSession`.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::models::Session;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Sesión autenticada que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

/// Token Bearer del header Authorization
pub fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Exigir una sesión válida
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?
        .to_string();

    let session = state.auth.session(&token).await?;

    // Los datos se cargan recién cuando hay alguien autenticado
    state.cache.ensure_loaded();

    request.extensions_mut().insert(CurrentSession(session));
    Ok(next.run(request).await)
}
