use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use maintenance_tracker::config::EnvironmentConfig;
use maintenance_tracker::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🔧 Maintenance Tracker - API de manutenção");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    let addr = config.server_url();
    let state = AppState::new(config).await?;
    let app = create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /api/auth/login - Login");
    info!("   POST /api/auth/logout | GET /api/auth/me | PUT /api/auth/theme");
    info!("   GET  /api/data - Todas las colecciones");
    info!("   POST /api/data/refresh[/reference|/history] - Recargar");
    info!("   GET|POST /api/history - Histórico");
    info!("   PUT|DELETE /api/history/:id");
    info!("   GET  /api/history/export - CSV del histórico");
    info!("   GET|POST /api/reference/:table - Cadastros");
    info!("   PUT|DELETE /api/reference/:table/:id");
    info!("   GET  /api/dashboard | /api/reports | /api/reports/export | /api/diagnostics");
    info!("   POST /api/ai/defect-analysis | /api/ai/diagnosis | /api/ai/history-summary");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
