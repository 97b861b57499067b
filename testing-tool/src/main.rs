use anyhow::{bail, Context, Result};
use colored::*;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🔧 Maintenance Tracker Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = prompt_with_default("URL del servidor", "http://localhost:3000")?;
    let client = Client::new();

    check_health(&client, &base_url).await?;

    // Paso 1: Pedir credenciales
    let credentials = get_credentials()?;

    // Paso 2: Autenticarse y obtener token
    let token = authenticate(&client, &base_url, &credentials).await?;

    // Paso 3: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 📦 Ver colecciones cargadas");
        println!("2. 📝 Crear lançamento de prueba");
        println!("3. 📊 Ver dashboard");
        println!("4. 📄 Exportar histórico (CSV)");
        println!("5. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-5): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        let outcome = match choice.trim() {
            "1" => show_data(&client, &base_url, &token).await,
            "2" => create_sample_record(&client, &base_url, &token).await,
            "3" => show_dashboard(&client, &base_url, &token).await,
            "4" => export_history(&client, &base_url, &token).await,
            "5" => {
                logout(&client, &base_url, &token).await?;
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("{} {}", "❌ Error:".bright_red().bold(), e);
        }
    }

    Ok(())
}

struct Credentials {
    email: String,
    password: String,
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", format!("{}: ", label).bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn prompt_with_default(label: &str, default: &str) -> Result<String> {
    let value = prompt(&format!("{} [{}]", label, default))?;
    Ok(if value.is_empty() {
        default.to_string()
    } else {
        value.trim_end_matches('/').to_string()
    })
}

fn get_credentials() -> Result<Credentials> {
    println!();
    println!("{}", "🔐 CREDENCIALES".bright_cyan().bold());
    println!("{}", "===============".bright_cyan());

    Ok(Credentials {
        email: prompt_with_default("Email", "manutencao@termep.com.br")?,
        password: prompt_with_default("Password", "termep123")?,
    })
}

async fn check_health(client: &Client, base_url: &str) -> Result<()> {
    let response = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .context("el servidor no responde")?;

    if response.status() != StatusCode::OK {
        bail!("health check devolvió {}", response.status());
    }
    println!("{}", "✅ Servidor disponible".bright_green());
    Ok(())
}

async fn authenticate(client: &Client, base_url: &str, credentials: &Credentials) -> Result<String> {
    println!();
    println!("{}", "🔐 AUTENTICANDO...".bright_cyan().bold());

    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "email": credentials.email, "password": credentials.password }))
        .send()
        .await?;

    let status = response.status();
    let body: Value = response.json().await?;
    if !status.is_success() {
        bail!("login rechazado ({}): {}", status, body["message"]);
    }

    let token = body["token"]
        .as_str()
        .context("la respuesta no trae token")?
        .to_string();

    println!(
        "{} {} ({})",
        "✅ Sesión abierta para".bright_green(),
        body["user"]["name"].as_str().unwrap_or("-"),
        body["user"]["role"].as_str().unwrap_or("-")
    );
    Ok(token)
}

async fn show_data(client: &Client, base_url: &str, token: &str) -> Result<()> {
    let body: Value = client
        .get(format!("{}/api/data", base_url))
        .bearer_auth(token)
        .send()
        .await?
        .json()
        .await?;

    if body["loading"].as_bool().unwrap_or(false) {
        println!("{}", "⏳ Las colecciones todavía se están cargando".bright_yellow());
    }

    for key in ["equipments", "technicians", "sectors", "companies", "maintenanceTypes", "history"] {
        let count = body[key].as_array().map(Vec::len).unwrap_or(0);
        println!("   {:<18} {}", key.bright_blue(), count);
    }
    Ok(())
}

async fn create_sample_record(client: &Client, base_url: &str, token: &str) -> Result<()> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let record = json!({
        "equipamentoId": "1",
        "horimetroKm": 1000,
        "horaChegada": "08:00",
        "dataInicial": today,
        "mecanicoId": "1",
        "tipoManutencaoId": "1",
        "defeitoFalha": "Teste do testing-tool",
        "solucaoProcedimentos": "Nenhuma ação",
        "valor": 0
    });

    let response = client
        .post(format!("{}/api/history", base_url))
        .bearer_auth(token)
        .json(&record)
        .send()
        .await?;

    let status = response.status();
    let body: Value = response.json().await?;
    println!("{}", "📦 Respuesta:".bright_blue());
    println!("{}", serde_json::to_string_pretty(&body)?);

    if status.is_success() && body["persisted"] == false {
        println!("{}", "⚠️ Modo offline: el lançamento no se guardó".bright_yellow());
    }
    Ok(())
}

async fn show_dashboard(client: &Client, base_url: &str, token: &str) -> Result<()> {
    let body: Value = client
        .get(format!("{}/api/dashboard", base_url))
        .bearer_auth(token)
        .send()
        .await?
        .json()
        .await?;

    let stats = &body["stats"];
    println!("{}", "📊 DASHBOARD".bright_cyan().bold());
    println!("   Total:      {}", stats["total"]);
    println!("   Concluídos: {}", stats["completed"]);
    println!("   Pendentes:  {}", stats["pending"]);
    println!("   Custo:      R$ {}", stats["totalCost"]);
    Ok(())
}

async fn export_history(client: &Client, base_url: &str, token: &str) -> Result<()> {
    let response = client
        .get(format!("{}/api/history/export", base_url))
        .bearer_auth(token)
        .send()
        .await?;

    if response.status() == StatusCode::NO_CONTENT {
        println!("{}", "ℹ️ No hay lançamentos para exportar".bright_yellow());
        return Ok(());
    }

    let file_name = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split("filename=").nth(1))
        .map(|v| v.trim_matches('"').to_string())
        .unwrap_or_else(|| "export.csv".to_string());

    let content = response.text().await?;
    std::fs::write(&file_name, &content)?;
    println!(
        "{} {} ({} líneas)",
        "✅ CSV guardado en".bright_green(),
        file_name,
        content.lines().count()
    );
    Ok(())
}

async fn logout(client: &Client, base_url: &str, token: &str) -> Result<()> {
    client
        .post(format!("{}/api/auth/logout", base_url))
        .bearer_auth(token)
        .send()
        .await?;
    Ok(())
}
