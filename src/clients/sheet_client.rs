//! Cliente HTTP para la planilla remota (Google Apps Script)
//!
//! Un único endpoint atiende las siete pestañas:
//! - lectura: `GET <endpoint>?tab=<Pestaña>` devuelve un array de filas
//!   o un sobre `{status, data?, message?}`
//! - escritura: `POST <endpoint>` con `{action, tab, data?, id?}`
//!
//! El cliente es total: cualquier falla (sin configurar, timeout, red,
//! HTTP no-2xx, sobre con `status: "error"`, JSON inválido) se registra en el
//! log y se reemplaza por los datos de ejemplo de `mock_data`. Quien llama
//! nunca recibe un error de transporte.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use super::mock_data::{mock_rows, offline_write_result, OFFLINE_WRITE_MESSAGE};
use crate::config::EnvironmentConfig;
use crate::models::TableName;

/// Acción de escritura sobre una pestaña
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetAction {
    Create,
    Update,
    Delete,
}

impl SheetAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetAction::Create => "create",
            SheetAction::Update => "update",
            SheetAction::Delete => "delete",
        }
    }
}

/// Cuerpo del POST a la planilla
#[derive(Debug, Serialize)]
struct SheetWriteRequest<'a> {
    action: SheetAction,
    tab: TableName,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

/// Fallas del transporte. Nunca salen del cliente: se convierten en fallback.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("HTTP Error: {0}")]
    Status(reqwest::StatusCode),

    #[error("API error: {0}")]
    Envelope(String),

    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SheetError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SheetError::Timeout
        } else {
            SheetError::Network(e)
        }
    }
}

/// Resultado de una escritura.
///
/// `persisted` es `false` cuando la escritura fue absorbida por el modo
/// offline: la operación se reporta como exitosa pero nada cambió en la
/// planilla.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteOutcome {
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip)]
    pub data: Value,
}

impl WriteOutcome {
    fn offline() -> Self {
        Self {
            persisted: false,
            message: Some(OFFLINE_WRITE_MESSAGE.to_string()),
            data: offline_write_result(),
        }
    }
}

/// Cliente de la planilla
#[derive(Clone)]
pub struct SheetClient {
    client: Client,
    endpoint: Option<String>,
}

impl SheetClient {
    /// Crear el cliente. `endpoint = None` activa el modo demo sin red.
    pub fn new(endpoint: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &EnvironmentConfig) -> anyhow::Result<Self> {
        Self::new(
            config.sheet_endpoint().map(str::to_string),
            config.sheet_request_timeout,
        )
    }

    /// Indica si hay una planilla real configurada
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Leer una pestaña. Siempre devuelve un valor: el real o el de ejemplo.
    pub async fn read(&self, table: TableName) -> Value {
        let Some(endpoint) = self.endpoint.as_deref() else {
            log::warn!("⚠️ Planilla no configurada, se usan datos de ejemplo para {}", table);
            return mock_rows(table);
        };

        match self.try_read(endpoint, table).await {
            Ok(rows) => {
                log::debug!("📄 Pestaña {} leída de la planilla", table);
                rows
            }
            Err(e) => {
                log::error!("❌ Error leyendo la pestaña {}: {}", table, e);
                log::warn!("⚠️ Sin respuesta válida de la planilla (GET {}), se usan datos de ejemplo", table);
                mock_rows(table)
            }
        }
    }

    /// Escribir en una pestaña. Siempre devuelve un resultado exitoso; en
    /// modo offline con `persisted = false`.
    pub async fn write(
        &self,
        action: SheetAction,
        table: TableName,
        data: Option<&Value>,
        id: Option<&str>,
    ) -> WriteOutcome {
        let Some(endpoint) = self.endpoint.as_deref() else {
            log::warn!(
                "⚠️ Planilla no configurada, {} en {} simulado (modo offline)",
                action.as_str(),
                table
            );
            return WriteOutcome::offline();
        };

        let request = SheetWriteRequest {
            action,
            tab: table,
            data,
            id,
        };

        match self.try_write(endpoint, &request).await {
            Ok(payload) => {
                log::info!("✅ {} en {} confirmado por la planilla", action.as_str(), table);
                let message = payload
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                WriteOutcome {
                    persisted: true,
                    message,
                    data: payload,
                }
            }
            Err(e) => {
                log::error!("❌ Error escribiendo ({} {}): {}", action.as_str(), table, e);
                log::warn!("⚠️ Sin respuesta válida de la planilla (POST {}), operación simulada", table);
                WriteOutcome::offline()
            }
        }
    }

    async fn try_read(&self, endpoint: &str, table: TableName) -> Result<Value, SheetError> {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        let url = format!(
            "{}{}tab={}",
            endpoint,
            separator,
            urlencoding::encode(table.as_str())
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn try_write(
        &self,
        endpoint: &str,
        request: &SheetWriteRequest<'_>,
    ) -> Result<Value, SheetError> {
        let response = self
            .client
            .post(endpoint)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Value, SheetError> {
        let status = response.status();
        if !status.is_success() {
            return Err(SheetError::Status(status));
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        unwrap_payload(body)
    }
}

/// Desenvolver el sobre de la planilla: `data` si viene con valor,
/// si no el cuerpo completo. `status: "error"` es una falla.
pub fn unwrap_payload(body: Value) -> Result<Value, SheetError> {
    if let Value::Object(ref map) = body {
        if map.get("status").and_then(Value::as_str) == Some("error") {
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Erro retornado pela API")
                .to_string();
            return Err(SheetError::Envelope(message));
        }

        if let Some(data) = map.get("data") {
            if is_truthy(data) {
                return Ok(data.clone());
            }
        }
    }

    Ok(body)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_payload() {
        let rows = json!([{ "id": "1" }]);
        assert_eq!(unwrap_payload(rows.clone()).unwrap(), rows);

        let envelope = json!({ "status": "success", "data": [{ "id": "1" }] });
        assert_eq!(unwrap_payload(envelope).unwrap(), rows);

        let no_data = json!({ "status": "success", "message": "ok", "data": null });
        assert_eq!(unwrap_payload(no_data.clone()).unwrap(), no_data);

        let error = json!({ "status": "error", "message": "Aba não encontrada" });
        match unwrap_payload(error) {
            Err(SheetError::Envelope(message)) => assert_eq!(message, "Aba não encontrada"),
            other => panic!("expected envelope error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_request_body() {
        let data = json!({ "id": "9", "nome": "ANA" });
        let request = SheetWriteRequest {
            action: SheetAction::Create,
            tab: TableName::Tecnicos,
            data: Some(&data),
            id: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({ "action": "create", "tab": "Tecnicos", "data": data }));

        let request = SheetWriteRequest {
            action: SheetAction::Delete,
            tab: TableName::Lancamentos,
            data: None,
            id: Some("101"),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({ "action": "delete", "tab": "Lancamentos", "id": "101" }));
    }

    #[tokio::test]
    async fn test_unconfigured_client_uses_mock_data() {
        let client = SheetClient::new(None, Duration::from_secs(10)).unwrap();
        assert!(!client.is_configured());

        let equipment = client.read(TableName::Equipamentos).await;
        assert_eq!(equipment, *crate::clients::mock_data::MOCK_EQUIPMENT);

        let outcome = client
            .write(SheetAction::Delete, TableName::Setores, None, Some("1"))
            .await;
        assert!(!outcome.persisted);
        assert_eq!(outcome.data["status"], "success");
    }
}
