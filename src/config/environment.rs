//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Marcador que deja la plantilla de configuración cuando no se pegó la URL real
pub const SHEET_URL_PLACEHOLDER: &str = "INSIRA_SUA_URL";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    // Planilla remota (Google Apps Script)
    pub sheet_endpoint_url: Option<String>,
    pub sheet_request_timeout: Duration,
    // Asistente de IA
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    // Sesiones persistidas
    pub session_store_path: Option<PathBuf>,
    pub session_ttl: Duration,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            log_level: "debug".to_string(),
            sheet_endpoint_url: None,
            sheet_request_timeout: Duration::from_secs(10),
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            session_store_path: None,
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 7 días
        }
    }
}

impl EnvironmentConfig {
    /// Construir la configuración a partir de las variables de entorno.
    /// Toda variable tiene un valor por defecto; sólo falla si un número
    /// viene mal formado.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid number, got '{}'", raw))?,
            Err(_) => defaults.port,
        };

        let sheet_request_timeout = match env::var("SHEET_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.trim().parse().with_context(|| {
                format!("SHEET_REQUEST_TIMEOUT_SECS must be a valid number, got '{}'", raw)
            })?),
            Err(_) => defaults.sheet_request_timeout,
        };

        let session_ttl = match env::var("SESSION_TTL_HOURS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("SESSION_TTL_HOURS must be a valid number, got '{}'", raw))?
                    * 3600,
            ),
            Err(_) => defaults.session_ttl,
        };

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            sheet_endpoint_url: non_empty_var("SHEET_ENDPOINT_URL"),
            sheet_request_timeout,
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            session_store_path: non_empty_var("SESSION_STORE_PATH")
                .map(PathBuf::from)
                .or_else(|| Some(PathBuf::from("data/sessions.json"))),
            session_ttl,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL de la planilla si está realmente configurada.
    /// Ausente, vacía o con el marcador de la plantilla = modo demo.
    pub fn sheet_endpoint(&self) -> Option<&str> {
        self.sheet_endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && !url.contains(SHEET_URL_PLACEHOLDER))
    }

    /// Nivel de logging para tracing_subscriber
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level
            .parse()
            .unwrap_or(tracing::Level::DEBUG)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_endpoint_placeholder_is_unconfigured() {
        let mut config = EnvironmentConfig::default();
        assert_eq!(config.sheet_endpoint(), None);

        config.sheet_endpoint_url = Some("https://script.google.com/macros/s/INSIRA_SUA_URL/exec".into());
        assert_eq!(config.sheet_endpoint(), None);

        config.sheet_endpoint_url = Some("   ".into());
        assert_eq!(config.sheet_endpoint(), None);

        config.sheet_endpoint_url = Some("https://script.google.com/macros/s/abc/exec".into());
        assert_eq!(config.sheet_endpoint(), Some("https://script.google.com/macros/s/abc/exec"));
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.sheet_request_timeout, Duration::from_secs(10));
        assert_eq!(config.session_ttl, Duration::from_secs(604_800));
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert!(config.is_development());
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
    }
}
