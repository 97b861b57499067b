//! Integración con una planilla falsa servida por axum en un puerto efímero

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use maintenance_tracker::cache::AppDataCache;
use maintenance_tracker::clients::mock_data::{mock_rows, MOCK_SECTORS};
use maintenance_tracker::clients::{SheetAction, SheetClient};
use maintenance_tracker::config::EnvironmentConfig;
use maintenance_tracker::models::{ReferenceTable, TableName};
use maintenance_tracker::services::SheetService;

#[derive(Clone, Copy)]
enum TabMode {
    ErrorEnvelope,
    ServerError,
    NonObjectRows,
}

#[derive(Clone, Default)]
struct FakeSheet {
    posts: Arc<Mutex<Vec<Value>>>,
    modes: Arc<Mutex<HashMap<String, TabMode>>>,
}

impl FakeSheet {
    fn set_mode(&self, tab: &str, mode: TabMode) {
        self.modes.lock().unwrap().insert(tab.to_string(), mode);
    }

    fn posts(&self) -> Vec<Value> {
        self.posts.lock().unwrap().clone()
    }
}

fn live_rows(tab: &str) -> Value {
    match tab {
        "Equipamentos" => json!({
            "status": "success",
            "data": [{ "id": 900, "codigo": "EQ-900", "descricao": "GUINDASTE", "ano": 2024 }]
        }),
        "Tecnicos" => json!([{ "id": "7", "codigo": "TEC-07", "nome": "RITA", "empresaId": 1 }]),
        "Setores" => json!([{ "id": "9", "codigo": "SET-09", "nome": "PÁTIO" }]),
        "Empresas" => json!([{ "id": "3", "nome": "OFICINA PARCEIRA" }]),
        "Tipos" => json!([{ "id": "1", "tipo": "PREVENTIVA" }]),
        "Lancamentos" => json!({
            "status": "success",
            "data": [
                { "id": "1", "dataInicial": "2024-01-01T03:00:00.000Z", "valor": "10" },
                { "id": "2", "dataInicial": "2024-03-01", "dataFinal": "2024-03-02", "valor": 20 }
            ]
        }),
        _ => json!([]),
    }
}

async fn read_tab(
    State(sheet): State<FakeSheet>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let tab = params.get("tab").cloned().unwrap_or_default();
    let mode = sheet.modes.lock().unwrap().get(&tab).copied();

    match mode {
        Some(TabMode::ErrorEnvelope) => {
            Json(json!({ "status": "error", "message": "Aba não encontrada" })).into_response()
        }
        Some(TabMode::ServerError) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some(TabMode::NonObjectRows) => Json(json!([{ "id": "1", "nome": "A" }, 7])).into_response(),
        None => Json(live_rows(&tab)).into_response(),
    }
}

async fn write_tab(State(sheet): State<FakeSheet>, Json(body): Json<Value>) -> Json<Value> {
    sheet.posts.lock().unwrap().push(body);
    Json(json!({ "status": "success", "message": "Salvo na planilha" }))
}

async fn start_fake_sheet() -> (String, FakeSheet) {
    let sheet = FakeSheet::default();
    let app = Router::new()
        .route("/exec", get(read_tab).post(write_tab))
        .with_state(sheet.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/exec", addr), sheet)
}

fn service_for(endpoint: &str) -> SheetService {
    SheetService::new(SheetClient::new(Some(endpoint.to_string()), Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn test_live_reads_unwrap_envelope_and_coerce_cells() {
    let (endpoint, _sheet) = start_fake_sheet().await;
    let service = service_for(&endpoint);

    let equipment = service.fetch_equipment().await.unwrap();
    assert_eq!(equipment.len(), 1);
    assert_eq!(equipment[0].id, "900");
    assert_eq!(equipment[0].ano, "2024");

    let technicians = service.fetch_technicians().await.unwrap();
    assert_eq!(technicians[0].empresa_id, "1");

    let history = service.fetch_history().await.unwrap();
    assert_eq!(history[0].id, "2");
    assert_eq!(history[1].data_inicial, "2024-01-01");
    assert_eq!(history[1].valor, 10.0);
}

#[tokio::test]
async fn test_read_is_idempotent() {
    let (endpoint, _sheet) = start_fake_sheet().await;
    let client = SheetClient::new(Some(endpoint), Duration::from_secs(5)).unwrap();
    assert_eq!(client.read(TableName::Setores).await, client.read(TableName::Setores).await);

    let offline = SheetClient::new(None, Duration::from_secs(5)).unwrap();
    assert_eq!(offline.read(TableName::Tipos).await, offline.read(TableName::Tipos).await);
}

#[tokio::test]
async fn test_create_technician_without_id() {
    let (endpoint, sheet) = start_fake_sheet().await;
    let service = service_for(&endpoint);

    let result = service
        .create_item(
            ReferenceTable::Technicians,
            json!({ "codigo": "TEC-05", "nome": "MARIA", "empresaId": "2" }),
        )
        .await
        .unwrap();
    assert!(result.outcome.persisted);
    assert_eq!(result.outcome.message.as_deref(), Some("Salvo na planilha"));

    let posts = sheet.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["action"], "create");
    assert_eq!(posts[0]["tab"], "Tecnicos");
    assert!(posts[0].get("id").is_none());

    let data = &posts[0]["data"];
    assert_eq!(data["id"], json!(result.id));
    assert!(!result.id.is_empty());
    assert_eq!(data["codigo"], "TEC-05");
    assert_eq!(data["nome"], "MARIA");
    assert_eq!(data["empresaId"], "2");
}

#[tokio::test]
async fn test_delete_sends_id_only() {
    let (endpoint, sheet) = start_fake_sheet().await;
    let service = service_for(&endpoint);

    service.delete_history_record("101").await.unwrap();
    let posts = sheet.posts();
    assert_eq!(posts[0], json!({ "action": "delete", "tab": "Lancamentos", "id": "101" }));
}

#[tokio::test]
async fn test_error_envelope_and_server_error_fall_back() {
    let (endpoint, sheet) = start_fake_sheet().await;
    sheet.set_mode("Setores", TabMode::ErrorEnvelope);
    sheet.set_mode("Empresas", TabMode::ServerError);
    let client = SheetClient::new(Some(endpoint), Duration::from_secs(5)).unwrap();

    assert_eq!(client.read(TableName::Setores).await, *MOCK_SECTORS);
    assert_eq!(client.read(TableName::Empresas).await, mock_rows(TableName::Empresas));
}

#[tokio::test]
async fn test_unreachable_endpoint_falls_back_for_every_table() {
    // Puerto cerrado: la conexión se rechaza de inmediato
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SheetClient::new(Some(format!("http://{}/exec", addr)), Duration::from_secs(2)).unwrap();
    for table in TableName::ALL {
        assert_eq!(client.read(table).await, mock_rows(table), "tabla {}", table);
    }

    let outcome = client
        .write(SheetAction::Update, TableName::Equipamentos, Some(&json!({ "id": "1" })), None)
        .await;
    assert!(!outcome.persisted);
    assert_eq!(outcome.data["status"], "success");
}

#[tokio::test]
async fn test_placeholder_url_means_demo_mode() {
    let config = EnvironmentConfig {
        sheet_endpoint_url: Some("https://script.google.com/macros/s/INSIRA_SUA_URL/exec".to_string()),
        ..EnvironmentConfig::default()
    };
    let client = SheetClient::from_config(&config).unwrap();
    assert!(!client.is_configured());
    assert_eq!(client.read(TableName::Equipamentos).await, mock_rows(TableName::Equipamentos));
}

#[tokio::test]
async fn test_undecodable_rows_fall_back_on_first_load() {
    let (endpoint, sheet) = start_fake_sheet().await;
    for table in TableName::ALL {
        sheet.set_mode(table.as_str(), TabMode::NonObjectRows);
    }
    let cache = AppDataCache::new(Arc::new(service_for(&endpoint)));

    cache.load_all().await;
    let data = cache.snapshot().await;
    assert!(!data.loading);
    assert_eq!(data.equipments.len(), 5);
    assert_eq!(data.technicians.len(), 4);
    assert_eq!(data.sectors.len(), 5);
    assert_eq!(data.companies.len(), 2);
    assert_eq!(data.maintenance_types.len(), 4);
}

#[tokio::test]
async fn test_refresh_with_bad_rows_replaces_live_data_with_builtin_data() {
    let (endpoint, sheet) = start_fake_sheet().await;
    let cache = AppDataCache::new(Arc::new(service_for(&endpoint)));

    cache.load_all().await;
    let before = cache.snapshot().await;
    assert_eq!(before.sectors.len(), 1);
    assert_eq!(before.sectors[0].nome, "PÁTIO");

    sheet.set_mode("Setores", TabMode::NonObjectRows);
    sheet.set_mode("Tipos", TabMode::ErrorEnvelope);
    cache.refresh_reference_data().await;

    let after = cache.snapshot().await;
    assert_eq!(after.sectors.len(), 5);
    assert_eq!(after.maintenance_types.len(), 4);
    assert_eq!(after.equipments, before.equipments);
}

#[tokio::test]
async fn test_mutation_reloads_affected_collection() {
    let (endpoint, sheet) = start_fake_sheet().await;
    let cache = AppDataCache::new(Arc::new(service_for(&endpoint)));
    cache.load_all().await;

    sheet.set_mode("Setores", TabMode::ErrorEnvelope);
    cache
        .create_item(ReferenceTable::Sectors, json!({ "codigo": "SET-10", "nome": "LAVAGEM" }))
        .await
        .unwrap();

    // La recarga posterior a la escritura cae en los datos de ejemplo
    assert_eq!(cache.snapshot().await.sectors.len(), 5);
    assert_eq!(sheet.posts()[0]["tab"], "Setores");
}
