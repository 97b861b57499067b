//! Datos de ejemplo para el modo offline
//!
//! Cuando la planilla no está configurada o no responde, el cliente devuelve
//! estas filas tal cual. Nunca se modifican: una escritura en modo offline
//! no cambia lo que devuelve la próxima lectura.

use lazy_static::lazy_static;
use serde_json::{json, Value};

use crate::models::TableName;

/// Mensaje de la respuesta sintética para escrituras offline
pub const OFFLINE_WRITE_MESSAGE: &str = "Operação simulada com sucesso (Modo Offline)";

lazy_static! {
    pub static ref MOCK_EQUIPMENT: Value = json!([
        { "id": "1", "codigo": "EQ-001", "descricao": "ESCAVADEIRA CAT 320", "tipo": "PESADO", "marca": "CATERPILLAR", "modelo": "320", "ano": "2022" },
        { "id": "2", "codigo": "EQ-002", "descricao": "CAMINHÃO VOLVO VM", "tipo": "CAMINHAO", "marca": "VOLVO", "modelo": "VM 270", "ano": "2020" },
        { "id": "3", "codigo": "EQ-003", "descricao": "GERADOR 150KVA", "tipo": "GERADOR", "marca": "STEMAC", "modelo": "ST150", "ano": "2019" },
        { "id": "4", "codigo": "EQ-004", "descricao": "COMPRESSOR ATLAS", "tipo": "COMPRESSOR", "marca": "ATLAS COPCO", "modelo": "XAS", "ano": "2021" },
        { "id": "5", "codigo": "EQ-005", "descricao": "EMPILHADEIRA HYSTER", "tipo": "EMPILHADEIRA", "marca": "HYSTER", "modelo": "H50", "ano": "2018" }
    ]);

    pub static ref MOCK_TECHS: Value = json!([
        { "id": "1", "codigo": "TEC-01", "nome": "JOÃO SILVA", "empresaId": "1" },
        { "id": "2", "codigo": "TEC-02", "nome": "PEDRO SANTOS", "empresaId": "1" },
        { "id": "3", "codigo": "TEC-03", "nome": "CARLOS OLIVEIRA", "empresaId": "1" },
        { "id": "4", "codigo": "TEC-04", "nome": "ANA PEREIRA", "empresaId": "1" }
    ]);

    pub static ref MOCK_SECTORS: Value = json!([
        { "id": "1", "codigo": "SET-01", "nome": "OPERAÇÃO MINA" },
        { "id": "2", "codigo": "SET-02", "nome": "TRANSPORTE" },
        { "id": "3", "codigo": "SET-03", "nome": "OFICINA CENTRAL" },
        { "id": "4", "codigo": "SET-04", "nome": "ADMINISTRATIVO" },
        { "id": "5", "codigo": "SET-05", "nome": "AR CONDICIONADO" }
    ]);

    pub static ref MOCK_COMPANIES: Value = json!([
        { "id": "1", "codigo": "EMP-01", "nome": "TERMEP ENGENHARIA", "cpfCnpj": "00.000.000/0001-00", "cidade": "SÃO PAULO", "contato": "ADMIN" },
        { "id": "2", "codigo": "EMP-02", "nome": "TERCEIRIZADA A", "cpfCnpj": "11.111.111/0001-11", "cidade": "RIO DE JANEIRO", "contato": "SUPORTE" }
    ]);

    pub static ref MOCK_MAINTENANCE_TYPES: Value = json!([
        { "id": "1", "codigo": "TM-01", "tipo": "MANUTENÇÃO PREVENTIVA" },
        { "id": "2", "codigo": "TM-02", "tipo": "MANUTENÇÃO CORRETIVA" },
        { "id": "3", "codigo": "TM-03", "tipo": "INSPEÇÃO DIÁRIA" },
        { "id": "4", "codigo": "TM-04", "tipo": "LUBRIFICAÇÃO" }
    ]);

    pub static ref MOCK_HISTORY: Value = json!([
        {
            "id": "101",
            "equipamentoId": "1",
            "horimetroKm": 5000,
            "horaChegada": "08:00",
            "dataInicial": "2023-11-15",
            "dataFinal": "2023-11-15",
            "empresaId": "1",
            "tipoManutencaoId": "1",
            "setorId": "1",
            "documentacaoOS": "OS-2023-001",
            "mecanicoId": "1",
            "defeitoFalha": "TROCA DE ÓLEO PROGRAMADA",
            "causaDiagnostico": "MANUTENÇÃO PREVENTIVA",
            "dicasManutencao": "VERIFICAR FILTROS AR",
            "pecasUtilizadas": "ÓLEO 15W40, FILTRO COMBUSTÍVEL",
            "solucaoProcedimentos": "REALIZADA TROCA DE ÓLEO E FILTROS",
            "outrosProblemas": "",
            "valor": 1500
        },
        {
            "id": "102",
            "equipamentoId": "2",
            "horimetroKm": 120000,
            "horaChegada": "14:00",
            "dataInicial": "2023-11-16",
            "dataFinal": "",
            "empresaId": "1",
            "tipoManutencaoId": "2",
            "setorId": "2",
            "documentacaoOS": "OS-2023-002",
            "mecanicoId": "2",
            "defeitoFalha": "FREIO FAZENDO BARULHO",
            "causaDiagnostico": "PASTILHAS GASTAS",
            "dicasManutencao": "",
            "pecasUtilizadas": "PASTILHAS DE FREIO",
            "solucaoProcedimentos": "TROCA DAS PASTILHAS DIANTEIRAS",
            "outrosProblemas": "DISCOS COM DESGASTE LEVE",
            "valor": 800
        },
        {
            "id": "103",
            "equipamentoId": "3",
            "horimetroKm": 200,
            "horaChegada": "09:00",
            "dataInicial": "2023-11-17",
            "dataFinal": "2023-11-17",
            "empresaId": "1",
            "tipoManutencaoId": "2",
            "setorId": "5",
            "documentacaoOS": "OS-2023-003",
            "mecanicoId": "3",
            "defeitoFalha": "NÃO GELA",
            "causaDiagnostico": "GÁS REFRIGERANTE BAIXO",
            "dicasManutencao": "VERIFICAR VAZAMENTOS",
            "pecasUtilizadas": "GÁS R134A",
            "solucaoProcedimentos": "RECARGA DE GÁS E TESTE DE PRESSÃO",
            "outrosProblemas": "",
            "valor": 1200
        }
    ]);
}

/// Respuesta sintética de una escritura sin planilla
pub fn offline_write_result() -> Value {
    json!({ "status": "success", "message": OFFLINE_WRITE_MESSAGE })
}

/// Filas de ejemplo de una pestaña. `Defeitos` no tiene datos de ejemplo y
/// cae en la respuesta sintética, igual que una escritura.
pub fn mock_rows(table: TableName) -> Value {
    match table {
        TableName::Equipamentos => MOCK_EQUIPMENT.clone(),
        TableName::Tecnicos => MOCK_TECHS.clone(),
        TableName::Setores => MOCK_SECTORS.clone(),
        TableName::Empresas => MOCK_COMPANIES.clone(),
        TableName::Tipos => MOCK_MAINTENANCE_TYPES.clone(),
        TableName::Lancamentos => MOCK_HISTORY.clone(),
        TableName::Defeitos => offline_write_result(),
    }
}
