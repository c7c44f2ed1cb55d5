use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::directivo_controller::{
    ActualizarDirectivoRequest, CrearDirectivoRequest, DirectivoController,
};
use crate::dto::common::ApiResponse;
use crate::models::directivo::DirectivoConDireccion;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_directivo_router() -> Router<AppState> {
    Router::new()
        .route("/directivos", get(list_directivos))
        .route("/directivos", post(create_directivo))
        .route("/directivos/:id", put(update_directivo))
        .route("/directivos/:id", delete(delete_directivo))
}

async fn list_directivos(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DirectivoConDireccion>>>, AppError> {
    let controller = DirectivoController::new(state.pool.clone());
    let directivos = controller.listar().await?;

    Ok(Json(ApiResponse::success(directivos)))
}

async fn create_directivo(
    State(state): State<AppState>,
    Json(request): Json<CrearDirectivoRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let controller = DirectivoController::new(state.pool.clone());
    let directivo_id = controller.crear(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Directivo creado exitosamente",
            "directivoId": directivo_id,
        })),
    ))
}

async fn update_directivo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ActualizarDirectivoRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = DirectivoController::new(state.pool.clone());
    controller.actualizar(id, request).await?;

    Ok(Json(ApiResponse::message_only(
        "Directivo actualizado exitosamente".to_string(),
    )))
}

async fn delete_directivo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = DirectivoController::new(state.pool.clone());
    controller.eliminar(id).await?;

    Ok(Json(ApiResponse::message_only(
        "Directivo eliminado exitosamente".to_string(),
    )))
}
