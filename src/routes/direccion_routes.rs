use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::dto::common::ApiResponse;
use crate::models::direccion::Direccion;
use crate::repositories::direccion_repository::DireccionRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
struct CrearDireccionRequest {
    nombre: Option<String>,
}

pub fn create_direccion_router() -> Router<AppState> {
    Router::new()
        .route("/direcciones", get(list_direcciones))
        .route("/direcciones", post(create_direccion))
}

async fn list_direcciones(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Direccion>>>, AppError> {
    let repository = DireccionRepository::new(state.pool.clone());
    let direcciones = repository.list().await?;

    Ok(Json(ApiResponse::success(direcciones)))
}

async fn create_direccion(
    State(state): State<AppState>,
    Json(request): Json<CrearDireccionRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let nombre = request
        .nombre
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::Validation("El nombre es requerido".to_string()))?;

    let repository = DireccionRepository::new(state.pool.clone());
    let direccion_id = repository.create(&nombre).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Dirección creada exitosamente",
            "direccionId": direccion_id,
        })),
    ))
}
