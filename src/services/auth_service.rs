//! Servicio de autenticación
//!
//! Lista fija de credenciales; cada login abre una sesión con token opaco
//! que se guarda en el `SessionStore`.

use lazy_static::lazy_static;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::cache::SessionStore;
use crate::models::user::LoginRequest;
use crate::models::{Session, User, UserRole};
use crate::utils::errors::{AppError, AppResult};

pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "Credenciais inválidas. Tente manutencao@termep.com.br / termep123";

struct Credential {
    user: User,
    password: &'static str,
}

lazy_static! {
    static ref USERS: Vec<Credential> = vec![
        Credential {
            user: User {
                id: "1".to_string(),
                name: "Administrador".to_string(),
                email: "manutencao@termep.com.br".to_string(),
                role: UserRole::Admin,
                avatar: None,
            },
            password: "termep123",
        },
        Credential {
            user: User {
                id: "2".to_string(),
                name: "Operador".to_string(),
                email: "user@termep.com".to_string(),
                role: UserRole::User,
                avatar: None,
            },
            password: "123",
        },
    ];
}

/// Verificar credenciales. Devuelve el usuario sin contraseña.
pub fn authenticate(email: &str, password: &str) -> AppResult<User> {
    USERS
        .iter()
        .find(|c| c.user.email == email && c.password == password)
        .map(|c| c.user.clone())
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string()))
}

pub struct AuthService {
    sessions: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn login(&self, request: &LoginRequest) -> AppResult<Session> {
        request.validate()?;

        let user = authenticate(request.email.trim(), &request.password).map_err(|e| {
            log::warn!("🔒 Login rechazado para {}", request.email);
            e
        })?;

        let session = Session::new(Uuid::new_v4().to_string(), user);
        self.sessions.insert(session.clone()).await?;

        log::info!("✅ Login exitoso: {} ({:?})", session.user.email, session.user.role);
        Ok(session)
    }

    pub async fn logout(&self, token: &str) -> AppResult<()> {
        if let Some(session) = self.sessions.remove(token).await? {
            log::info!("👋 Logout: {}", session.user.email);
        }
        Ok(())
    }

    /// Sesión vigente para el token, o `Unauthorized`
    pub async fn session(&self, token: &str) -> AppResult<Session> {
        self.sessions
            .get(token)
            .await
            .ok_or_else(|| AppError::Unauthorized("Sessão inválida ou expirada".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_authenticate() {
        let admin = authenticate("manutencao@termep.com.br", "termep123").unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(admin.name, "Administrador");

        let user = authenticate("user@termep.com", "123").unwrap();
        assert_eq!(user.role, UserRole::User);

        match authenticate("user@termep.com", "errada") {
            Err(AppError::Unauthorized(message)) => assert_eq!(message, INVALID_CREDENTIALS_MESSAGE),
            other => panic!("expected unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let service = AuthService::new(Arc::new(SessionStore::in_memory(Duration::from_secs(3600))));

        let session = service
            .login(&request("manutencao@termep.com.br", "termep123"))
            .await
            .unwrap();
        assert!(Uuid::parse_str(&session.token).is_ok());
        assert_eq!(service.session(&session.token).await.unwrap().user.id, "1");

        service.logout(&session.token).await.unwrap();
        assert!(service.session(&session.token).await.is_err());
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() {
        let service = AuthService::new(Arc::new(SessionStore::in_memory(Duration::ZERO)));
        let session = service.login(&request("user@termep.com", "123")).await.unwrap();

        assert!(matches!(
            service.session(&session.token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_login_validates_email() {
        let service = AuthService::new(Arc::new(SessionStore::in_memory(Duration::from_secs(3600))));
        assert!(matches!(
            service.login(&request("not-an-email", "x")).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.login(&request("user@termep.com", "999")).await,
            Err(AppError::Unauthorized(_))
        ));
    }
}
