//! Modelos de las tablas de referencia
//!
//! Equipamentos, técnicos, setores, empresas y tipos de manutenção.
//! Los nombres de campo siguen exactamente las columnas de la planilla.

use serde::{Deserialize, Serialize};

use crate::utils::coercion::lenient_string;

/// Equipamento
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub codigo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub descricao: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tipo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub marca: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub modelo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ano: String,
}

impl Equipment {
    /// Etiqueta usada en selects y reportes: "EQ-001 - ESCAVADEIRA CAT 320"
    pub fn label(&self) -> String {
        format!("{} - {}", self.codigo, self.descricao)
    }
}

/// Técnico / mecânico
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub codigo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nome: String,
    /// Referencia débil a la empresa, sólo para consulta
    #[serde(default, deserialize_with = "lenient_string")]
    pub empresa_id: String,
}

/// Setor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub codigo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nome: String,
}

/// Empresa
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub codigo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nome: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cpf_cnpj: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cidade: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub contato: String,
}

/// Tipo de manutenção
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceType {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub codigo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tipo: String,
}
