//! Normalización de filas de la pestaña Lancamentos
//!
//! Las filas llegan sin tipo: campos ausentes, números como string, fechas
//! como timestamp. Aquí se convierten en `MaintenanceRecord` con un valor por
//! defecto explícito para cada campo.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::cmp::Ordering;

use crate::models::MaintenanceRecord;
use crate::utils::coercion::{coerce_number, coerce_string, truncate_date};

/// Normalizar una fila cruda
pub fn normalize(row: &Value) -> MaintenanceRecord {
    let empty = Map::new();
    let fields = row.as_object().unwrap_or(&empty);

    let text = |key: &str| fields.get(key).map(coerce_string).unwrap_or_default();
    let number = |key: &str| fields.get(key).map(coerce_number).unwrap_or(0.0);

    let data_inicial = truncate_date(&text("dataInicial"));
    let data_final = Some(truncate_date(&text("dataFinal"))).filter(|date| !date.is_empty());

    MaintenanceRecord {
        id: text("id"),
        equipamento_id: text("equipamentoId"),
        horimetro_km: number("horimetroKm"),
        hora_chegada: text("horaChegada"),
        data_inicial,
        data_final,
        empresa_id: text("empresaId"),
        tipo_manutencao_id: text("tipoManutencaoId"),
        setor_id: text("setorId"),
        documentacao_os: text("documentacaoOS"),
        mecanico_id: text("mecanicoId"),
        defeito_falha: text("defeitoFalha"),
        causa_diagnostico: text("causaDiagnostico"),
        dicas_manutencao: text("dicasManutencao"),
        pecas_utilizadas: text("pecasUtilizadas"),
        solucao_procedimentos: text("solucaoProcedimentos"),
        outros_problemas: text("outrosProblemas"),
        valor: number("valor"),
    }
}

/// Normalizar la respuesta completa de la pestaña y ordenarla por fecha
/// inicial descendente. Una respuesta que no es array da lista vacía.
pub fn normalize_history(payload: &Value) -> Vec<MaintenanceRecord> {
    let Some(rows) = payload.as_array() else {
        log::warn!("⚠️ El histórico no es un array, se devuelve lista vacía");
        return Vec::new();
    };

    let mut records: Vec<MaintenanceRecord> = rows.iter().map(normalize).collect();
    sort_history(&mut records);
    records
}

/// Fecha inicial interpretada; `None` si falta o no es válida
pub fn start_date(record: &MaintenanceRecord) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(record.data_inicial.trim(), "%Y-%m-%d").ok()
}

/// Orden descendente por fecha inicial. Fechas inválidas o ausentes van al final.
pub fn compare_newest_first(a: &MaintenanceRecord, b: &MaintenanceRecord) -> Ordering {
    start_date(b).cmp(&start_date(a))
}

pub fn sort_history(records: &mut [MaintenanceRecord]) {
    records.sort_by(compare_newest_first);
}
