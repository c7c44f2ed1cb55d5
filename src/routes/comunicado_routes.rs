use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::comunicado_controller::{
    ActualizarComunicadoRequest, ComunicadoController, CrearComunicadoRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::clamp_limit;

pub fn create_comunicado_router() -> Router<AppState> {
    Router::new()
        .route("/comunicados", post(create_comunicado))
        .route("/comunicados", get(list_comunicados))
        .route("/comunicados-admin", get(list_comunicados_admin))
        .route("/comunicados-recientes", get(list_recientes))
        .route("/comunicados/:id", get(get_comunicado))
        .route("/comunicados/:id", put(update_comunicado))
        .route("/comunicados/:id", delete(delete_comunicado))
}

async fn create_comunicado(
    State(state): State<AppState>,
    Json(request): Json<CrearComunicadoRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let controller = ComunicadoController::new(state.pool.clone());
    let comunicado_id = controller.crear(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Comunicado publicado exitosamente",
            "comunicadoId": comunicado_id,
        })),
    ))
}

/// Comunicados públicos (solo estado 'publicado')
async fn list_comunicados(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = ComunicadoController::new(state.pool.clone());
    let comunicados = controller.listar_publicados().await?;

    Ok(Json(json!({
        "success": true,
        "data": comunicados,
    })))
}

/// Para administración: todos los estados
async fn list_comunicados_admin(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = ComunicadoController::new(state.pool.clone());
    let comunicados = controller.listar_todos().await?;

    Ok(Json(json!({
        "success": true,
        "data": comunicados,
    })))
}

/// Los últimos N publicados; `limit` se recorta a [1, 100] con default 5
async fn list_recientes(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let limit = clamp_limit(params.get("limit").map(|s| s.as_str()));

    let controller = ComunicadoController::new(state.pool.clone());
    let comunicados = controller.recientes(limit).await?;

    Ok(Json(json!({
        "success": true,
        "data": comunicados,
        "limit": limit,
    })))
}

async fn get_comunicado(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let controller = ComunicadoController::new(state.pool.clone());
    let comunicado = controller.obtener(id).await?;

    Ok(Json(json!({
        "success": true,
        "data": comunicado,
    })))
}

async fn update_comunicado(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ActualizarComunicadoRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = ComunicadoController::new(state.pool.clone());
    controller.actualizar(id, request).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Comunicado actualizado exitosamente",
    })))
}

async fn delete_comunicado(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let controller = ComunicadoController::new(state.pool.clone());
    controller.eliminar(id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Comunicado eliminado exitosamente",
    })))
}
