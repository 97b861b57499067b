//! Filtros, estadísticas y búsquedas sobre el histórico
//!
//! Todo es puro: recibe la foto del cache y devuelve vistas nuevas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::cache::AppDataSnapshot;
use crate::models::{
    Equipment, MaintenanceRecord, MaintenanceType, RecordView, Sector, Technician,
};
use crate::services::record_normalizer::sort_history;
use crate::utils::errors::{bad_request_error, AppResult};

pub const EQUIPMENT_NOT_FOUND: &str = "EQUIPAMENTO NÃO ENCONTRADO";

/// Cantidad de registros recientes del dashboard
const RECENT_LIMIT: usize = 10;

/// Vista por tipo de mantenimiento
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visualization {
    #[default]
    Todas,
    Preventivas,
    Corretivas,
}

impl Visualization {
    fn required_label(&self) -> Option<&'static str> {
        match self {
            Visualization::Todas => None,
            Visualization::Preventivas => Some("PREVENTIVA"),
            Visualization::Corretivas => Some("CORRETIVA"),
        }
    }
}

/// Filtro del dashboard y de los relatorios
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportFilter {
    pub visualization: Visualization,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub equipamento_id: Option<String>,
    pub mecanico_id: Option<String>,
    pub setor_id: Option<String>,
    pub tipo_manutencao_id: Option<String>,
    pub causa: Option<String>,
}

/// Filtro de la pantalla de histórico
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryFilter {
    pub search: Option<String>,
    pub equipamento_id: Option<String>,
    pub mecanico_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Búsqueda de diagnósticos anteriores
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosticsQuery {
    pub search: Option<String>,
    pub equipamento_id: Option<String>,
    pub setor_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub total_cost: f64,
}

impl DashboardStats {
    pub fn from_records(records: &[MaintenanceRecord]) -> Self {
        let completed = records.iter().filter(|r| r.is_completed()).count();
        let total_cost = records
            .iter()
            .map(|r| r.valor)
            .filter(|v| v.is_finite())
            .sum();

        Self {
            total: records.len(),
            completed,
            pending: records.len() - completed,
            total_cost,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSlice {
    pub name: &'static str,
    pub value: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub chart: Vec<ChartSlice>,
    pub recent: Vec<RecordView>,
    pub unique_causes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticHit {
    #[serde(flatten)]
    pub record: RecordView,
    pub equipment_label: String,
    pub sector_name: String,
}

/// Búsquedas por id sobre las tablas de referencia.
/// Nunca fallan: quien llama decide el texto de reemplazo.
pub struct Lookups<'a> {
    pub equipments: &'a [Equipment],
    pub technicians: &'a [Technician],
    pub sectors: &'a [Sector],
    pub maintenance_types: &'a [MaintenanceType],
}

impl<'a> Lookups<'a> {
    pub fn from_snapshot(data: &'a AppDataSnapshot) -> Self {
        Self {
            equipments: &data.equipments,
            technicians: &data.technicians,
            sectors: &data.sectors,
            maintenance_types: &data.maintenance_types,
        }
    }

    pub fn equipment(&self, id: &str) -> Option<&'a Equipment> {
        self.equipments.iter().find(|e| e.id == id)
    }

    pub fn equipment_name(&self, id: &str) -> Option<&'a str> {
        self.equipment(id).map(|e| e.descricao.as_str()).filter(|s| !s.is_empty())
    }

    pub fn equipment_code(&self, id: &str) -> Option<&'a str> {
        self.equipment(id).map(|e| e.codigo.as_str()).filter(|s| !s.is_empty())
    }

    pub fn technician_name(&self, id: &str) -> Option<&'a str> {
        self.technicians
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.nome.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn sector_name(&self, id: &str) -> Option<&'a str> {
        self.sectors
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.nome.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn type_label(&self, id: &str) -> Option<&'a str> {
        self.maintenance_types
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.tipo.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// `YYYY-MM-DD` → `DD/MM/YYYY`; vacío → `-`; cualquier otra cosa sin cambios
pub fn format_date(date: Option<&str>) -> String {
    let Some(date) = date.filter(|d| !d.is_empty()) else {
        return "-".to_string();
    };

    let parts: Vec<&str> = date.split('-').collect();
    if parts.len() == 3 {
        format!("{}/{}/{}", parts[2], parts[1], parts[0])
    } else {
        date.to_string()
    }
}

/// Causas distintas y no vacías, ordenadas
pub fn unique_causes(records: &[MaintenanceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.causa_diagnostico.as_str())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn matches_id(record_id: &str, filter: &Option<String>) -> bool {
    match active(filter) {
        Some(wanted) => record_id.trim() == wanted,
        None => true,
    }
}

fn within_dates(record: &MaintenanceRecord, start: &Option<String>, end: &Option<String>) -> bool {
    if let Some(start) = active(start) {
        if record.data_inicial.as_str() < start {
            return false;
        }
    }
    if let Some(end) = active(end) {
        if record.data_inicial.as_str() > end {
            return false;
        }
    }
    true
}

fn matches_visualization(
    record: &MaintenanceRecord,
    visualization: Visualization,
    lookups: &Lookups<'_>,
) -> bool {
    let Some(required) = visualization.required_label() else {
        return true;
    };

    lookups
        .type_label(&record.tipo_manutencao_id)
        .map(|label| label.to_uppercase().contains(required))
        .unwrap_or(false)
}

fn contains_term(field: &str, term: &str) -> bool {
    field.to_lowercase().contains(term)
}

/// Registros que pasan el filtro del relatorio, del más reciente al más antiguo
pub fn filter_report(
    records: &[MaintenanceRecord],
    filter: &ReportFilter,
    lookups: &Lookups<'_>,
) -> Vec<MaintenanceRecord> {
    let mut result: Vec<MaintenanceRecord> = records
        .iter()
        .filter(|r| matches_visualization(r, filter.visualization, lookups))
        .filter(|r| within_dates(r, &filter.start_date, &filter.end_date))
        .filter(|r| matches_id(&r.equipamento_id, &filter.equipamento_id))
        .filter(|r| matches_id(&r.mecanico_id, &filter.mecanico_id))
        .filter(|r| matches_id(&r.setor_id, &filter.setor_id))
        .filter(|r| matches_id(&r.tipo_manutencao_id, &filter.tipo_manutencao_id))
        .filter(|r| match filter.causa.as_deref().filter(|c| !c.is_empty()) {
            Some(cause) => r.causa_diagnostico == cause,
            None => true,
        })
        .cloned()
        .collect();

    sort_history(&mut result);
    result
}

pub fn build_dashboard(
    records: &[MaintenanceRecord],
    filter: &ReportFilter,
    lookups: &Lookups<'_>,
) -> Dashboard {
    let filtered = filter_report(records, filter, lookups);
    let stats = DashboardStats::from_records(&filtered);

    Dashboard {
        chart: vec![
            ChartSlice {
                name: "CONCLUÍDOS",
                value: stats.completed,
            },
            ChartSlice {
                name: "ABERTOS",
                value: stats.pending,
            },
        ],
        stats,
        recent: filtered
            .into_iter()
            .take(RECENT_LIMIT)
            .map(RecordView::from)
            .collect(),
        unique_causes: unique_causes(records),
    }
}

pub fn filter_history(records: &[MaintenanceRecord], filter: &HistoryFilter) -> Vec<MaintenanceRecord> {
    let term = filter
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();

    records
        .iter()
        .filter(|r| {
            term.is_empty()
                || contains_term(&r.defeito_falha, &term)
                || contains_term(&r.solucao_procedimentos, &term)
                || contains_term(&r.documentacao_os, &term)
        })
        .filter(|r| matches_id(&r.equipamento_id, &filter.equipamento_id))
        .filter(|r| matches_id(&r.mecanico_id, &filter.mecanico_id))
        .filter(|r| within_dates(r, &filter.start_date, &filter.end_date))
        .cloned()
        .collect()
}

/// Buscar diagnósticos anteriores. Exige al menos un criterio.
pub fn search_diagnostics(
    records: &[MaintenanceRecord],
    query: &DiagnosticsQuery,
    lookups: &Lookups<'_>,
) -> AppResult<Vec<DiagnosticHit>> {
    let term = active(&query.search).map(str::to_lowercase);

    if term.is_none() && active(&query.equipamento_id).is_none() && active(&query.setor_id).is_none() {
        return Err(bad_request_error(
            "Informe um termo de busca, um equipamento ou um setor",
        ));
    }

    let mut found: Vec<MaintenanceRecord> = records
        .iter()
        .filter(|r| match term.as_deref() {
            Some(term) => {
                contains_term(&r.causa_diagnostico, term)
                    || contains_term(&r.defeito_falha, term)
                    || contains_term(&r.solucao_procedimentos, term)
                    || contains_term(&r.pecas_utilizadas, term)
            }
            None => true,
        })
        .filter(|r| matches_id(&r.equipamento_id, &query.equipamento_id))
        .filter(|r| matches_id(&r.setor_id, &query.setor_id))
        .cloned()
        .collect();

    sort_history(&mut found);

    Ok(found
        .into_iter()
        .map(|record| DiagnosticHit {
            equipment_label: lookups
                .equipment(&record.equipamento_id)
                .map(Equipment::label)
                .unwrap_or_else(|| EQUIPMENT_NOT_FOUND.to_string()),
            sector_name: lookups
                .sector_name(&record.setor_id)
                .unwrap_or("-")
                .to_string(),
            record: RecordView::from(record),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::record_normalizer::normalize_history;
    use serde_json::json;

    fn snapshot() -> AppDataSnapshot {
        let types: Vec<MaintenanceType> = serde_json::from_value(json!([
            { "id": "1", "codigo": "MP", "tipo": "Manutenção Preventiva" },
            { "id": "2", "codigo": "MC", "tipo": "MANUTENÇÃO CORRETIVA" }
        ]))
        .unwrap();
        let equipments: Vec<Equipment> = serde_json::from_value(json!([
            { "id": "1", "codigo": "EQ-001", "descricao": "TRATOR" }
        ]))
        .unwrap();
        let sectors: Vec<Sector> = serde_json::from_value(json!([{ "id": "3", "nome": "OFICINA" }])).unwrap();

        let history = normalize_history(&json!([
            { "id": "a", "dataInicial": "2024-01-10", "dataFinal": "2024-01-11", "tipoManutencaoId": "1",
              "equipamentoId": "1", "setorId": "3", "causaDiagnostico": "Filtro", "valor": 100,
              "defeitoFalha": "Vazamento de óleo", "documentacaoOS": "OS-77" },
            { "id": "b", "dataInicial": "2024-02-01", "tipoManutencaoId": "2", "equipamentoId": " 1 ",
              "causaDiagnostico": "Correia", "valor": "50.5", "pecasUtilizadas": "Correia dentada" },
            { "id": "c", "dataInicial": "2023-12-31", "tipoManutencaoId": "99", "causaDiagnostico": "Filtro",
              "mecanicoId": "7", "solucaoProcedimentos": "Troca do FILTRO" }
        ]));

        AppDataSnapshot {
            equipments,
            sectors,
            maintenance_types: types,
            history,
            loading: false,
            ..AppDataSnapshot::default()
        }
    }

    fn ids(records: &[MaintenanceRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2023-11-15")), "15/11/2023");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_date(Some("")), "-");
        assert_eq!(format_date(Some("ontem")), "ontem");
    }

    #[test]
    fn test_visualization_excludes_unknown_types() {
        let data = snapshot();
        let lookups = Lookups::from_snapshot(&data);

        let filter = ReportFilter {
            visualization: Visualization::Preventivas,
            ..Default::default()
        };
        assert_eq!(ids(&filter_report(&data.history, &filter, &lookups)), vec!["a"]);

        let filter = ReportFilter {
            visualization: Visualization::Corretivas,
            ..Default::default()
        };
        assert_eq!(ids(&filter_report(&data.history, &filter, &lookups)), vec!["b"]);

        let all = filter_report(&data.history, &ReportFilter::default(), &lookups);
        assert_eq!(ids(&all), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_report_filter_dates_ids_and_cause() {
        let data = snapshot();
        let lookups = Lookups::from_snapshot(&data);

        let filter = ReportFilter {
            start_date: Some("2024-01-10".into()),
            end_date: Some("2024-02-01".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_report(&data.history, &filter, &lookups)), vec!["b", "a"]);

        let filter = ReportFilter {
            equipamento_id: Some("1".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_report(&data.history, &filter, &lookups)), vec!["b", "a"]);

        let filter = ReportFilter {
            causa: Some("Filtro".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_report(&data.history, &filter, &lookups)), vec!["a", "c"]);

        let filter = ReportFilter {
            causa: Some("filtro".into()),
            ..Default::default()
        };
        assert!(filter_report(&data.history, &filter, &lookups).is_empty());
    }

    #[test]
    fn test_dashboard_stats() {
        let data = snapshot();
        let lookups = Lookups::from_snapshot(&data);
        let dashboard = build_dashboard(&data.history, &ReportFilter::default(), &lookups);

        assert_eq!(dashboard.stats.total, 3);
        assert_eq!(dashboard.stats.completed, 1);
        assert_eq!(dashboard.stats.pending, 2);
        assert_eq!(dashboard.stats.total_cost, 150.5);
        assert_eq!(dashboard.recent.len(), 3);
        assert_eq!(dashboard.unique_causes, vec!["Correia", "Filtro"]);
        assert_eq!(dashboard.chart[0].value, 1);
        assert_eq!(dashboard.chart[1].value, 2);
    }

    #[test]
    fn test_history_search_is_case_insensitive() {
        let data = snapshot();

        let filter = HistoryFilter {
            search: Some("ÓLEO".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_history(&data.history, &filter)), vec!["a"]);

        let filter = HistoryFilter {
            search: Some("os-77".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_history(&data.history, &filter)), vec!["a"]);

        let filter = HistoryFilter {
            mecanico_id: Some("7".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_history(&data.history, &filter)), vec!["c"]);

        assert_eq!(filter_history(&data.history, &HistoryFilter::default()).len(), 3);
    }

    #[test]
    fn test_diagnostics_search() {
        let data = snapshot();
        let lookups = Lookups::from_snapshot(&data);

        assert!(search_diagnostics(&data.history, &DiagnosticsQuery::default(), &lookups).is_err());

        let query = DiagnosticsQuery {
            search: Some("filtro".into()),
            ..Default::default()
        };
        let hits = search_diagnostics(&data.history, &query, &lookups).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].record.record.id, "a");
        assert_eq!(hits[0].equipment_label, "EQ-001 - TRATOR");
        assert_eq!(hits[0].sector_name, "OFICINA");
        assert_eq!(hits[1].equipment_label, EQUIPMENT_NOT_FOUND);
        assert_eq!(hits[1].sector_name, "-");

        let query = DiagnosticsQuery {
            search: Some("dentada".into()),
            ..Default::default()
        };
        assert_eq!(search_diagnostics(&data.history, &query, &lookups).unwrap().len(), 1);
    }

    #[test]
    fn test_lookups_degrade() {
        let data = snapshot();
        let lookups = Lookups::from_snapshot(&data);
        assert_eq!(lookups.equipment_name("1"), Some("TRATOR"));
        assert_eq!(lookups.equipment_name("404"), None);
        assert_eq!(lookups.technician_name("7"), None);
        assert_eq!(lookups.type_label("2"), Some("MANUTENÇÃO CORRETIVA"));
    }
}
