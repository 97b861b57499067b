//! Modelo de lançamento de manutenção
//!
//! `MaintenanceRecord` es la entidad central: una intervención sobre un
//! equipamento. El estado (pendente / concluído) nunca se guarda; se deriva
//! de `data_final` cada vez que se consulta.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::coercion::{empty_as_none, lenient_number, lenient_string};
use crate::utils::validation::{validate_calendar_date, validate_not_empty, DATE_REGEX, TIME_REGEX};

/// Estado derivado de un lançamento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Concluído")]
    Completed,
}

impl Status {
    /// Estado para un valor de data final: presente y no vacío = concluído.
    /// Una celda con sólo espacios cuenta como presente.
    pub fn from_end_date(data_final: Option<&str>) -> Self {
        match data_final {
            Some(date) if !date.is_empty() => Status::Completed,
            _ => Status::Pending,
        }
    }

    /// Texto usado en las exportaciones CSV
    pub fn export_label(&self) -> &'static str {
        match self {
            Status::Pending => "PENDENTE",
            Status::Completed => "CONCLUIDO",
        }
    }
}

/// Lançamento de manutenção tal como vive en la pestaña Lancamentos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub equipamento_id: String,
    pub horimetro_km: f64,
    pub hora_chegada: String,
    /// YYYY-MM-DD
    pub data_inicial: String,
    /// YYYY-MM-DD; `None` significa orden abierta
    pub data_final: Option<String>,
    pub empresa_id: String,
    pub tipo_manutencao_id: String,
    pub setor_id: String,
    #[serde(rename = "documentacaoOS")]
    pub documentacao_os: String,
    pub mecanico_id: String,
    pub defeito_falha: String,
    pub causa_diagnostico: String,
    pub dicas_manutencao: String,
    pub pecas_utilizadas: String,
    pub solucao_procedimentos: String,
    pub outros_problemas: String,
    pub valor: f64,
}

impl MaintenanceRecord {
    pub fn status(&self) -> Status {
        Status::from_end_date(self.data_final.as_deref())
    }

    pub fn is_completed(&self) -> bool {
        self.status() == Status::Completed
    }
}

/// Lançamento con su estado derivado, para respuestas de la API
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    #[serde(flatten)]
    pub record: MaintenanceRecord,
    pub status: Status,
}

impl From<MaintenanceRecord> for RecordView {
    fn from(record: MaintenanceRecord) -> Self {
        let status = record.status();
        Self { record, status }
    }
}

/// Formulario de alta / edición de un lançamento
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordInput {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub id: Option<String>,

    #[validate(custom = "validate_not_empty")]
    #[serde(default, deserialize_with = "lenient_string")]
    pub equipamento_id: String,

    #[validate(range(min = 0.0))]
    #[serde(default, deserialize_with = "lenient_number")]
    pub horimetro_km: f64,

    #[validate(regex = "TIME_REGEX")]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub hora_chegada: Option<String>,

    #[validate(regex = "DATE_REGEX", custom = "validate_calendar_date")]
    #[serde(default, deserialize_with = "lenient_string")]
    pub data_inicial: String,

    #[validate(regex = "DATE_REGEX", custom = "validate_calendar_date")]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub data_final: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub empresa_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tipo_manutencao_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub setor_id: String,
    #[serde(default, rename = "documentacaoOS", deserialize_with = "lenient_string")]
    pub documentacao_os: String,

    #[validate(custom = "validate_not_empty")]
    #[serde(default, deserialize_with = "lenient_string")]
    pub mecanico_id: String,

    #[validate(custom = "validate_not_empty")]
    #[serde(default, deserialize_with = "lenient_string")]
    pub defeito_falha: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub causa_diagnostico: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dicas_manutencao: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pecas_utilizadas: String,

    #[validate(custom = "validate_not_empty")]
    #[serde(default, deserialize_with = "lenient_string")]
    pub solucao_procedimentos: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub outros_problemas: String,

    #[validate(range(min = 0.0))]
    #[serde(default, deserialize_with = "lenient_number")]
    pub valor: f64,
}

impl RecordInput {
    /// Convertir el formulario en lançamento con el id definitivo
    pub fn into_record(self, id: String) -> MaintenanceRecord {
        MaintenanceRecord {
            id,
            equipamento_id: self.equipamento_id,
            horimetro_km: self.horimetro_km,
            hora_chegada: self.hora_chegada.unwrap_or_default(),
            data_inicial: self.data_inicial,
            data_final: self.data_final,
            empresa_id: self.empresa_id,
            tipo_manutencao_id: self.tipo_manutencao_id,
            setor_id: self.setor_id,
            documentacao_os: self.documentacao_os,
            mecanico_id: self.mecanico_id,
            defeito_falha: self.defeito_falha,
            causa_diagnostico: self.causa_diagnostico,
            dicas_manutencao: self.dicas_manutencao,
            pecas_utilizadas: self.pecas_utilizadas,
            solucao_procedimentos: self.solucao_procedimentos,
            outros_problemas: self.outros_problemas,
            valor: self.valor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_input() -> serde_json::Value {
        json!({
            "equipamentoId": "1",
            "horimetroKm": "5000",
            "horaChegada": "08:00",
            "dataInicial": "2023-11-15",
            "dataFinal": "",
            "mecanicoId": "2",
            "defeitoFalha": "FREIO FAZENDO BARULHO",
            "solucaoProcedimentos": "TROCA DAS PASTILHAS",
            "valor": "800"
        })
    }

    #[test]
    fn test_status_follows_end_date() {
        let mut record = MaintenanceRecord {
            data_final: Some("2023-11-15".into()),
            ..Default::default()
        };
        assert_eq!(record.status(), Status::Completed);

        record.data_final = Some(String::new());
        assert_eq!(record.status(), Status::Pending);

        record.data_final = None;
        assert_eq!(record.status(), Status::Pending);

        record.data_final = Some("  ".into());
        assert_eq!(record.status(), Status::Completed);
    }

    #[test]
    fn test_wire_names() {
        let record = MaintenanceRecord {
            documentacao_os: "OS-1".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["documentacaoOS"], "OS-1");
        assert!(value.get("tipoManutencaoId").is_some());
        assert!(value["dataFinal"].is_null());
        assert!(value.get("status").is_none());

        let view = serde_json::to_value(RecordView::from(record)).unwrap();
        assert_eq!(view["status"], "Pendente");
        assert_eq!(view["documentacaoOS"], "OS-1");
    }

    #[test]
    fn test_input_validation() {
        let input: RecordInput = serde_json::from_value(valid_input()).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.data_final, None);
        assert_eq!(input.horimetro_km, 5000.0);

        let record = input.into_record("abc".into());
        assert_eq!(record.valor, 800.0);
        assert_eq!(record.status(), Status::Pending);
    }

    #[test]
    fn test_input_rejects_missing_required_fields() {
        let mut raw = valid_input();
        raw["equipamentoId"] = json!("");
        raw["dataInicial"] = json!("15/11/2023");
        let input: RecordInput = serde_json::from_value(raw).unwrap();

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("equipamento_id"));
        assert!(fields.contains_key("data_inicial"));
    }

    #[test]
    fn test_input_rejects_negative_cost() {
        let mut raw = valid_input();
        raw["valor"] = json!(-10);
        let input: RecordInput = serde_json::from_value(raw).unwrap();
        assert!(input.validate().is_err());
    }
}
