//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::cache::{AppDataCache, SessionStore};
use crate::clients::{GeminiClient, SheetClient, TextGenerator};
use crate::config::environment::EnvironmentConfig;
use crate::services::{AiAssistantService, AuthService, SheetService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub cache: AppDataCache,
    pub sessions: Arc<SessionStore>,
    pub auth: Arc<AuthService>,
    pub ai: Arc<AiAssistantService>,
}

impl AppState {
    /// Construir el estado con el cliente de Gemini real
    pub async fn new(config: EnvironmentConfig) -> anyhow::Result<Self> {
        let generator = Arc::new(GeminiClient::from_config(&config)?);
        Self::with_text_generator(config, generator).await
    }

    /// Construir el estado con un generador de texto a elección
    pub async fn with_text_generator(
        config: EnvironmentConfig,
        generator: Arc<dyn TextGenerator>,
    ) -> anyhow::Result<Self> {
        let sheet_client = SheetClient::from_config(&config)?;
        if sheet_client.is_configured() {
            log::info!("📊 Planilla configurada");
        } else {
            log::warn!("⚠️ Planilla no configurada, modo demo con datos de ejemplo");
        }

        let service = Arc::new(SheetService::new(sheet_client));
        let cache = AppDataCache::new(service);

        let sessions = Arc::new(SessionStore::open(config.session_store_path.clone(), config.session_ttl).await?);
        let auth = Arc::new(AuthService::new(sessions.clone()));
        let ai = Arc::new(AiAssistantService::new(generator));

        // Con una sesión restaurada los datos se cargan sin esperar un login
        if !sessions.is_empty().await {
            cache.ensure_loaded();
        }

        Ok(Self {
            config: Arc::new(config),
            cache,
            sessions,
            auth,
            ai,
        })
    }
}
