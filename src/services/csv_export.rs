//! Exportación CSV del histórico y de los relatorios
//!
//! Las celdas de texto van entre comillas, con comillas internas duplicadas y
//! en mayúsculas. Ids, números y fechas van sin comillas.

use chrono::NaiveDate;

use crate::models::MaintenanceRecord;
use crate::services::report_service::{format_date, Lookups};

const HISTORY_HEADERS: [&str; 10] = [
    "ID", "DATA", "OS", "COD_EQUIP", "EQUIPAMENTO", "MECANICO", "DEFEITO", "SOLUCAO", "VALOR",
    "STATUS",
];

const REPORT_HEADERS: [&str; 18] = [
    "ID",
    "EQUIPAMENTO",
    "HORIMETRO/KM",
    "HORA CHEGADA",
    "DATA INICIAL",
    "DATA FINAL",
    "EMPRESA",
    "TIPO MANUTENCAO",
    "SETOR",
    "OS",
    "MECANICO",
    "DEFEITO/FALHA",
    "CAUSA/DIAGNOSTICO",
    "DICAS",
    "PECAS UTILIZADAS",
    "SOLUCAO",
    "OUTROS PROBLEMAS",
    "VALOR",
];

/// Archivo CSV listo para descargar
#[derive(Debug, Clone, PartialEq)]
pub struct CsvFile {
    pub file_name: String,
    pub content: String,
}

/// Celda de texto
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\"").to_uppercase())
}

fn join(headers: &[&str], rows: impl Iterator<Item = String>) -> String {
    std::iter::once(headers.join(","))
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Exportar todo el histórico. `None` si no hay nada que exportar.
pub fn export_history(
    records: &[MaintenanceRecord],
    lookups: &Lookups<'_>,
    today: NaiveDate,
) -> Option<CsvFile> {
    if records.is_empty() {
        return None;
    }

    let rows = records.iter().map(|r| {
        [
            r.id.clone(),
            format_date(Some(&r.data_inicial)),
            quote(&r.documentacao_os),
            quote(lookups.equipment_code(&r.equipamento_id).unwrap_or("???")),
            quote(lookups.equipment_name(&r.equipamento_id).unwrap_or("N/A")),
            quote(lookups.technician_name(&r.mecanico_id).unwrap_or(&r.mecanico_id)),
            quote(&r.defeito_falha),
            quote(&r.solucao_procedimentos),
            r.valor.to_string(),
            r.status().export_label().to_string(),
        ]
        .join(",")
    });

    Some(CsvFile {
        file_name: format!("TODOS_LANCAMENTOS_{}.csv", today.format("%Y-%m-%d")),
        content: join(&HISTORY_HEADERS, rows),
    })
}

/// Exportar el resultado de un relatorio. `None` si está vacío.
pub fn export_report(
    records: &[MaintenanceRecord],
    lookups: &Lookups<'_>,
    today: NaiveDate,
) -> Option<CsvFile> {
    if records.is_empty() {
        return None;
    }

    let rows = records.iter().map(|r| {
        [
            r.id.clone(),
            quote(lookups.equipment_name(&r.equipamento_id).unwrap_or(&r.equipamento_id)),
            r.horimetro_km.to_string(),
            quote(&r.hora_chegada),
            format_date(Some(&r.data_inicial)),
            format_date(r.data_final.as_deref()),
            quote(&r.empresa_id),
            quote(lookups.type_label(&r.tipo_manutencao_id).unwrap_or(&r.tipo_manutencao_id)),
            quote(lookups.sector_name(&r.setor_id).unwrap_or(&r.setor_id)),
            quote(&r.documentacao_os),
            quote(lookups.technician_name(&r.mecanico_id).unwrap_or(&r.mecanico_id)),
            quote(&r.defeito_falha),
            quote(&r.causa_diagnostico),
            quote(&r.dicas_manutencao),
            quote(&r.pecas_utilizadas),
            quote(&r.solucao_procedimentos),
            quote(&r.outros_problemas),
            r.valor.to_string(),
        ]
        .join(",")
    });

    Some(CsvFile {
        file_name: format!("RELATORIO_MANUTENCAO_{}.csv", today.format("%Y-%m-%d")),
        content: join(&REPORT_HEADERS, rows),
    })
}
