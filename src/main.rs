use anyhow::Result;
use axum::{extract::Request, ServiceExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use agoa_backend::config::{DatabaseConfig, EnvironmentConfig, StoreBackend};
use agoa_backend::create_app;
use agoa_backend::database::DatabaseConnection;
use agoa_backend::repositories::{MemoryStore, PgStore, Store};
use agoa_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging (RUST_LOG, por defecto info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("✈️ AGOA - API de turnarounds");
    info!("================================================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {:#}", e);
            return Err(e);
        }
    };
    info!("⚙️ Entorno: {}", config.environment);

    // Inicializar store
    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let connection = match DatabaseConnection::connect(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {:#}", e);
                    return Err(e);
                }
            };
            connection.run_migrations().await?;
            Arc::new(PgStore::new(connection.into_pool()))
        }
        StoreBackend::Memory => {
            warn!("⚠️ Usando store en memoria: los datos se pierden al reiniciar");
            Arc::new(MemoryStore::new())
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(store, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles (con o sin barra final):");
    info!("   GET  /health - Health check (público)");
    info!("🏢 Aerolíneas:");
    info!("   GET/POST        /api/airlines");
    info!("   GET/PUT/DELETE  /api/airlines/:id");
    info!("   GET             /api/airlines/turnaround_stats");
    info!("🛬 Aeropuertos:");
    info!("   GET/POST        /api/airports");
    info!("   GET/PUT/DELETE  /api/airports/:id");
    info!("   GET             /api/airports/available_airports?date=YYYY-MM-DD");
    info!("🛫 Vuelos:");
    info!("   GET/POST        /api/flights");
    info!("   GET/PUT/DELETE  /api/flights/:id");
    info!("🔄 Turnarounds:");
    info!("   GET/POST        /api/turnarounds");
    info!("   GET/PUT/DELETE  /api/turnarounds/:id");
    info!("   GET             /api/turnarounds/by_date_and_airport?date=YYYY-MM-DD&airport=XXX");
    info!("   GET             /api/turnarounds/average_duration?date=YYYY-MM-DD");
    info!("   GET             /api/turnarounds/available_dates");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
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
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
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
