use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_system_router() -> Router<AppState> {
    Router::new()
        .route("/test", get(test_conexion))
        .route("/estadisticas", get(estadisticas))
}

/// Sonda de conectividad con la base de datos
async fn test_conexion(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let test: i32 = sqlx::query_scalar("SELECT 1 + 1")
        .fetch_one(&state.pool)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "API funcionando correctamente",
        "dbTest": test,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

/// Conteos básicos del sistema
async fn estadisticas(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let usuarios: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM super_users")
        .fetch_one(&state.pool)
        .await?;
    let direcciones: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM direcciones")
        .fetch_one(&state.pool)
        .await?;
    let directivos: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM directivos")
        .fetch_one(&state.pool)
        .await?;
    let personal: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM personal")
        .fetch_one(&state.pool)
        .await?;
    let comunicados: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM comunicados WHERE estado = 'publicado'")
            .fetch_one(&state.pool)
            .await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "usuarios": usuarios,
            "direcciones": direcciones,
            "directivos": directivos,
            "personal": personal,
            "comunicados": comunicados,
        },
    })))
}
