use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use transit_rider::config::environment::EnvironmentConfig;
use transit_rider::repositories::open_store;
use transit_rider::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚌 Transit Rider API ({})", config.environment);
    info!("================================================");

    // Inicializar store
    let store = match open_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error inicializando el store '{}': {}", config.storage_backend, e);
            return Err(anyhow::anyhow!("Error de store: {}", e));
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(store, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles (también bajo /api):");
    info!("   GET    /health");
    info!("   GET    /routes?category=&status=");
    info!("   GET    /routes/:id");
    info!("   POST   /routes");
    info!("   GET    /users?phone=");
    info!("   GET    /users/:id");
    info!("   POST   /users");
    info!("   GET    /users/:userId/favorites");
    info!("   POST   /users/:userId/favorites");
    info!("   DELETE /users/:userId/favorites/:routeId");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

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
            Ok(mut stream) => {
                stream.recv().await;
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
