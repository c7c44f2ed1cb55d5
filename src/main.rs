mod config;
mod controllers;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;
mod storage;
mod utils;

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::services::ServeDir;
use tracing::{error, info};
use dotenvy::dotenv;

use config::database::DatabaseConfig;
use config::environment::EnvironmentConfig;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🎓 University Admin - Backend administrativo");
    info!("============================================");

    // Inicializar base de datos
    let db_config = DatabaseConfig::default();
    let pool = match db_config.create_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Migraciones al arranque
    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }

    let config = EnvironmentConfig::default();
    let upload_dir = config.upload_dir.clone();
    let port = config.port;
    let app_state = AppState::new(pool, config);

    // Router principal
    let app = Router::new()
        .nest("/api/university", routes::create_university_router())
        // los archivos subidos también se sirven estáticos bajo /uploads
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   POST /api/university/login - Login super usuarios");
    info!("   POST /api/university/login-general - Login general (3 roles)");
    info!("   GET  /api/university/estadisticas - Conteos del sistema");
    info!("👥 Personal y directivos:");
    info!("   GET/POST /api/university/personal - Listar / crear personal");
    info!("   GET/POST /api/university/directivos - Listar / crear directivos");
    info!("   GET/POST /api/university/direcciones - Listar / crear direcciones");
    info!("📋 Actividades y comunicados:");
    info!("   POST /api/university/actividades - Crear actividad con imágenes");
    info!("   GET  /api/university/actividades/todas - Todas las actividades");
    info!("   GET  /api/university/comunicados - Comunicados publicados");
    info!("   GET  /api/university/comunicados-recientes - Últimos N comunicados");
    info!("📌 Tareas:");
    info!("   POST /api/university/tareas - Crear tarea con asignaciones");
    info!("   GET  /api/university/tareas - Listar tareas con progreso");
    info!("   POST /api/university/tareas/completar/:id - Completar asignación");
    info!("   GET  /api/university/tareas/personal/:id - Tareas de un personal");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
