use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::report_service::HistoryFilter;
use crate::utils::validation::validate_not_empty;

// Request de análisis de defecto
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DefectAnalysisRequest {
    #[validate(custom = "validate_not_empty")]
    pub equipamento_id: String,
    #[validate(custom = "validate_not_empty")]
    pub defeito: String,
}

// Request para refinar el diagnóstico del mecánico
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    #[validate(custom = "validate_not_empty")]
    pub equipamento_id: String,
    #[serde(default)]
    pub defeito: String,
    #[validate(custom = "validate_not_empty")]
    pub diagnostico: String,
}

// Request de resumen del histórico; el resto de los filtros es opcional
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummaryRequest {
    #[validate(custom = "validate_not_empty")]
    pub equipamento_id: String,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub mecanico_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl HistorySummaryRequest {
    pub fn filter(&self) -> HistoryFilter {
        HistoryFilter {
            search: self.search.clone(),
            equipamento_id: Some(self.equipamento_id.clone()),
            mecanico_id: self.mecanico_id.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

// Response del asistente
#[derive(Debug, Serialize)]
pub struct AiResponse {
    pub success: bool,
    pub text: String,
}

impl AiResponse {
    pub fn new(text: String) -> Self {
        Self { success: true, text }
    }
}
