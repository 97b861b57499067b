//! Almacén de sesiones
//!
//! Mapa token → sesión guardado como JSON en disco. Se carga al arrancar y se
//! reescribe completo en cada cambio. Sin ruta configurada vive sólo en memoria.
//! Las sesiones vencen al cumplir el TTL y se descartan en la siguiente escritura.

use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::models::{Session, Theme};
use crate::utils::errors::{AppError, AppResult};

type SessionMap = HashMap<String, Session>;

pub struct SessionStore {
    path: Option<PathBuf>,
    ttl: Duration,
    sessions: RwLock<SessionMap>,
}

impl SessionStore {
    pub fn in_memory(ttl: Duration) -> Self {
        Self {
            path: None,
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Abrir el almacén. Un archivo ilegible se ignora y se empieza vacío;
    /// las sesiones vencidas no se restauran.
    pub async fn open(path: Option<PathBuf>, ttl: Duration) -> AppResult<Self> {
        let mut sessions = match path.as_deref() {
            Some(path) => load_file(path).await?,
            None => HashMap::new(),
        };

        let now = Utc::now();
        sessions.retain(|_, session| !session.is_expired(ttl, now));

        if !sessions.is_empty() {
            log::info!("🔑 {} sesiones restauradas desde disco", sessions.len());
        }

        Ok(Self {
            path,
            ttl,
            sessions: RwLock::new(sessions),
        })
    }

    /// Sesión vigente para el token; una vencida cuenta como ausente
    pub async fn get(&self, token: &str) -> Option<Session> {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .get(token)
            .filter(|session| !session.is_expired(self.ttl, now))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    pub async fn insert(&self, session: Session) -> AppResult<()> {
        self.commit(|sessions| {
            sessions.insert(session.token.clone(), session);
            Ok(())
        })
        .await
    }

    pub async fn remove(&self, token: &str) -> AppResult<Option<Session>> {
        self.commit(|sessions| Ok(sessions.remove(token))).await
    }

    /// Cambiar el tema de una sesión existente
    pub async fn set_theme(&self, token: &str, theme: Theme) -> AppResult<Session> {
        self.commit(|sessions| {
            let session = sessions
                .get_mut(token)
                .ok_or_else(|| AppError::Unauthorized("Sessão inválida".to_string()))?;
            session.theme = theme;
            Ok(session.clone())
        })
        .await
    }

    /// Aplica el cambio sobre una copia sin vencidas, la guarda en disco y
    /// recién entonces la publica. Si el disco falla la memoria no cambia.
    async fn commit<T>(&self, change: impl FnOnce(&mut SessionMap) -> AppResult<T>) -> AppResult<T> {
        let mut sessions = self.sessions.write().await;

        let now = Utc::now();
        let mut next: SessionMap = sessions
            .iter()
            .filter(|(_, session)| !session.is_expired(self.ttl, now))
            .map(|(token, session)| (token.clone(), session.clone()))
            .collect();

        let result = change(&mut next)?;
        self.persist(&next).await?;
        *sessions = next;
        Ok(result)
    }

    async fn persist(&self, sessions: &SessionMap) -> AppResult<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(sessions)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, path).await?;

        log::debug!("💾 Sesiones guardadas en {}", path.display());
        Ok(())
    }
}

async fn load_file(path: &Path) -> AppResult<SessionMap> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_slice(&bytes) {
        Ok(sessions) => Ok(sessions),
        Err(e) => {
            log::warn!("⚠️ Archivo de sesiones inválido ({}): {}", path.display(), e);
            Ok(HashMap::new())
        }
    }
}
