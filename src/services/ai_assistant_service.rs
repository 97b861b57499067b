//! Asistente de IA para mantenimiento
//!
//! Arma los prompts en portugués y delega en un `TextGenerator`. Las fallas
//! nunca se propagan: se devuelve un texto fijo para mostrar al usuario.

use std::sync::Arc;

use crate::clients::TextGenerator;
use crate::models::{Equipment, MaintenanceRecord};

pub const CONNECTION_ERROR: &str = "Erro ao conectar com o assistente de IA.";
pub const HISTORY_ERROR: &str = "Erro na análise de histórico.";
pub const EMPTY_HISTORY: &str = "Sem histórico para análise.";
const NO_ANALYSIS: &str = "Não foi possível gerar uma análise.";
const NO_DIAGNOSIS: &str = "Não foi possível refinar o diagnóstico.";
const NO_SUMMARY: &str = "Análise indisponível.";

pub struct AiAssistantService {
    generator: Arc<dyn TextGenerator>,
}

impl AiAssistantService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Causas raíz probables y pasos de solución para un defecto
    pub async fn analyze_defect(&self, defect: &str, equipment: &Equipment) -> String {
        let prompt = format!(
            "Você é um especialista em manutenção industrial.\n\
             Equipamento: {} (Modelo: {}).\n\
             Problema relatado: \"{}\".\n\n\
             Forneça uma breve análise técnica de possíveis causas raízes e sugira 3 passos para solução.\n\
             Mantenha a resposta concisa e formatada.",
            equipment.descricao, equipment.modelo, defect
        );

        self.ask(&prompt, NO_ANALYSIS, CONNECTION_ERROR).await
    }

    /// Reescribir y validar el diagnóstico del mecánico
    pub async fn improve_diagnosis(
        &self,
        diagnosis: &str,
        defect: &str,
        equipment: &Equipment,
    ) -> String {
        let prompt = format!(
            "Atue como um Supervisor Sênior de Manutenção Técnica.\n\n\
             Contexto:\n\
             - Equipamento: {} ({} - {})\n\
             - Problema Original: \"{}\"\n\
             - Diagnóstico Inicial do Mecânico: \"{}\"\n\n\
             Sua tarefa é melhorar e validar esse diagnóstico.\n\
             1. Reescreva o diagnóstico de forma mais técnica e precisa (terminologia padrão da indústria).\n\
             2. Identifique se o mecânico pode ter esquecido de verificar algo relacionado a esse sintoma.\n\
             3. Se o diagnóstico parecer incompleto ou vago, sugira o que mais deve ser investigado.\n\n\
             Responda de forma direta e instrutiva, formatada em Markdown.",
            equipment.descricao, equipment.modelo, equipment.marca, defect, diagnosis
        );

        self.ask(&prompt, NO_DIAGNOSIS, CONNECTION_ERROR).await
    }

    /// Patrones recurrentes y plan preventivo a partir del histórico
    pub async fn history_summary(&self, records: &[MaintenanceRecord], equipment: &Equipment) -> String {
        if records.is_empty() {
            return EMPTY_HISTORY.to_string();
        }

        let history = records
            .iter()
            .map(|r| {
                format!(
                    "- Data: {}, Falha: {}, Causa: {}, Solução: {}, Valor: R${}",
                    r.data_inicial,
                    r.defeito_falha,
                    r.causa_diagnostico,
                    r.solucao_procedimentos,
                    r.valor
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "Analise o histórico de manutenção abaixo para o equipamento: {}.\n\
             Histórico:\n{}\n\n\
             Identifique padrões recorrentes, eficácia das soluções e sugira um plano de manutenção preventiva.\n\
             Responda em português, formato markdown.",
            equipment.descricao, history
        );

        self.ask(&prompt, NO_SUMMARY, HISTORY_ERROR).await
    }

    async fn ask(&self, prompt: &str, when_empty: &str, when_failed: &str) -> String {
        match self.generator.generate(prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                log::warn!("⚠️ El asistente devolvió una respuesta vacía");
                when_empty.to_string()
            }
            Err(e) => {
                log::error!("❌ Error del asistente Gemini: {}", e);
                when_failed.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::{AppError, AppResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Generador falso que registra los prompts recibidos
    struct FakeGenerator {
        reply: AppResult<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        fn replying(reply: AppResult<String>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> AppResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(AppError::ExternalApi("offline".into())),
            }
        }
    }

    fn equipment() -> Equipment {
        Equipment {
            id: "1".into(),
            codigo: "EQ-001".into(),
            descricao: "TRATOR AGRÍCOLA".into(),
            marca: "JOHN DEERE".into(),
            modelo: "6110J".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_analyze_defect_builds_prompt() {
        let fake = FakeGenerator::replying(Ok("Verificar o filtro.".into()));
        let assistant = AiAssistantService::new(fake.clone());

        let answer = assistant.analyze_defect("Motor falhando", &equipment()).await;
        assert_eq!(answer, "Verificar o filtro.");

        let prompts = fake.prompts.lock().unwrap();
        assert!(prompts[0].contains("Equipamento: TRATOR AGRÍCOLA (Modelo: 6110J)."));
        assert!(prompts[0].contains("Problema relatado: \"Motor falhando\"."));
    }

    #[tokio::test]
    async fn test_failures_and_empty_answers() {
        let assistant = AiAssistantService::new(FakeGenerator::replying(Err(AppError::Internal("x".into()))));
        assert_eq!(assistant.analyze_defect("x", &equipment()).await, CONNECTION_ERROR);
        assert_eq!(assistant.improve_diagnosis("d", "x", &equipment()).await, CONNECTION_ERROR);

        let record = MaintenanceRecord::default();
        assert_eq!(assistant.history_summary(&[record], &equipment()).await, HISTORY_ERROR);

        let assistant = AiAssistantService::new(FakeGenerator::replying(Ok("  ".into())));
        assert_eq!(assistant.analyze_defect("x", &equipment()).await, NO_ANALYSIS);
        assert_eq!(assistant.improve_diagnosis("d", "x", &equipment()).await, NO_DIAGNOSIS);
        assert_eq!(
            assistant.history_summary(&[MaintenanceRecord::default()], &equipment()).await,
            NO_SUMMARY
        );
    }

    #[tokio::test]
    async fn test_empty_history_skips_generator() {
        let fake = FakeGenerator::replying(Ok("nunca".into()));
        let assistant = AiAssistantService::new(fake.clone());

        assert_eq!(assistant.history_summary(&[], &equipment()).await, EMPTY_HISTORY);
        assert!(fake.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_prompt_lists_records() {
        let fake = FakeGenerator::replying(Ok("Plano preventivo".into()));
        let assistant = AiAssistantService::new(fake.clone());
        let record = MaintenanceRecord {
            data_inicial: "2023-11-15".into(),
            defeito_falha: "Vazamento".into(),
            causa_diagnostico: "Retentor".into(),
            solucao_procedimentos: "Troca".into(),
            valor: 1500.0,
            ..Default::default()
        };

        assistant.history_summary(&[record], &equipment()).await;
        let prompts = fake.prompts.lock().unwrap();
        assert!(prompts[0].contains(
            "- Data: 2023-11-15, Falha: Vazamento, Causa: Retentor, Solução: Troca, Valor: R$1500"
        ));
    }
}
