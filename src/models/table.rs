//! Tablas lógicas de la planilla
//!
//! La planilla remota se direcciona por el nombre de la pestaña. Las siete
//! pestañas son fijas; las cinco de referencia tienen además una clave lógica
//! usada por la pantalla de cadastros y por las rutas de la API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::errors::AppError;

/// Pestaña de la planilla
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableName {
    #[serde(rename = "Lancamentos")]
    Lancamentos,
    #[serde(rename = "Equipamentos")]
    Equipamentos,
    #[serde(rename = "Tecnicos")]
    Tecnicos,
    #[serde(rename = "Defeitos")]
    Defeitos,
    #[serde(rename = "Setores")]
    Setores,
    #[serde(rename = "Empresas")]
    Empresas,
    #[serde(rename = "Tipos")]
    Tipos,
}

impl TableName {
    pub const ALL: [TableName; 7] = [
        TableName::Lancamentos,
        TableName::Equipamentos,
        TableName::Tecnicos,
        TableName::Defeitos,
        TableName::Setores,
        TableName::Empresas,
        TableName::Tipos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Lancamentos => "Lancamentos",
            TableName::Equipamentos => "Equipamentos",
            TableName::Tecnicos => "Tecnicos",
            TableName::Defeitos => "Defeitos",
            TableName::Setores => "Setores",
            TableName::Empresas => "Empresas",
            TableName::Tipos => "Tipos",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tablas de referencia administradas desde cadastros
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceTable {
    Equipment,
    Technicians,
    Sectors,
    Companies,
    Types,
}

impl ReferenceTable {
    /// Pestaña de la planilla que respalda esta tabla
    pub fn table_name(&self) -> TableName {
        match self {
            ReferenceTable::Equipment => TableName::Equipamentos,
            ReferenceTable::Technicians => TableName::Tecnicos,
            ReferenceTable::Sectors => TableName::Setores,
            ReferenceTable::Companies => TableName::Empresas,
            ReferenceTable::Types => TableName::Tipos,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceTable::Equipment => "equipment",
            ReferenceTable::Technicians => "technicians",
            ReferenceTable::Sectors => "sectors",
            ReferenceTable::Companies => "companies",
            ReferenceTable::Types => "types",
        }
    }
}

impl fmt::Display for ReferenceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceTable {
    type Err = AppError;

    /// Mapeo cerrado de claves lógicas. Se aceptan la clave corta, la clave
    /// `db_*` del front-end y el nombre de la pestaña en portugués.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key.trim().to_ascii_lowercase().as_str() {
            "equipment" | "db_equipment" | "equipamentos" => Ok(ReferenceTable::Equipment),
            "technicians" | "db_technicians" | "tecnicos" | "mecanicos" => Ok(ReferenceTable::Technicians),
            "sectors" | "db_sectors" | "setores" => Ok(ReferenceTable::Sectors),
            "companies" | "db_companies" | "empresas" => Ok(ReferenceTable::Companies),
            "types" | "db_types" | "tipos" => Ok(ReferenceTable::Types),
            _ => Err(AppError::BadRequest(format!("Tabela desconhecida: '{}'", key))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_keys_map_to_tabs() {
        assert_eq!("db_companies".parse::<ReferenceTable>().unwrap().table_name(), TableName::Empresas);
        assert_eq!("db_technicians".parse::<ReferenceTable>().unwrap().table_name(), TableName::Tecnicos);
        assert_eq!("sectors".parse::<ReferenceTable>().unwrap().table_name(), TableName::Setores);
        assert_eq!("Tipos".parse::<ReferenceTable>().unwrap().table_name(), TableName::Tipos);
        assert_eq!("equipment".parse::<ReferenceTable>().unwrap().table_name(), TableName::Equipamentos);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        // Una clave desconocida nunca se usa como nombre de pestaña
        assert!("db_defeitos".parse::<ReferenceTable>().is_err());
        assert!("my_companies_backup".parse::<ReferenceTable>().is_err());
        assert!("".parse::<ReferenceTable>().is_err());
    }

    #[test]
    fn test_table_names() {
        let names: Vec<&str> = TableName::ALL.iter().map(TableName::as_str).collect();
        assert_eq!(
            names,
            vec!["Lancamentos", "Equipamentos", "Tecnicos", "Defeitos", "Setores", "Empresas", "Tipos"]
        );
    }
}
