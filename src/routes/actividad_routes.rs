use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::controllers::actividad_controller::ActividadController;
use crate::state::AppState;
use crate::storage::blob_store::content_type_for;
use crate::storage::multipart::ACTIVIDAD_UPLOAD;
use crate::storage::{collect_form, FileCategory};
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
struct ActualizarEstadoRequest {
    estado: String,
}

pub fn create_actividad_router() -> Router<AppState> {
    Router::new()
        .route("/actividades", post(create_actividad))
        .route("/actividades/todas", get(list_todas))
        .route("/actividades/direccion/:direccion_id", get(list_por_direccion))
        .route("/actividades/imagen/:filename", get(serve_imagen))
        .route("/actividades/:id/estado", put(update_estado))
        .route("/actividades/:id", delete(delete_actividad))
        // hasta 5 imágenes de 5MB en un solo formulario
        .layer(DefaultBodyLimit::max(30 * 1024 * 1024))
}

async fn create_actividad(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let payload = collect_form(multipart, ACTIVIDAD_UPLOAD).await?;
    tracing::info!("📸 Archivos recibidos: {}", payload.archivos.len());

    let controller = ActividadController::new(&state);
    let creada = controller.crear(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Actividad creada exitosamente",
            "actividadId": creada.actividad_id,
            "imagenesCount": creada.imagenes,
        })),
    ))
}

async fn list_todas(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = ActividadController::new(&state);
    let actividades = controller.listar_todas().await?;

    Ok(Json(json!({
        "success": true,
        "data": actividades,
        "total": actividades.len(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

async fn list_por_direccion(
    State(state): State<AppState>,
    Path(direccion_id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let controller = ActividadController::new(&state);
    let actividades = controller.listar_por_direccion(direccion_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": actividades,
    })))
}

async fn update_estado(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ActualizarEstadoRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = ActividadController::new(&state);
    let affected = controller.actualizar_estado(id, &request.estado).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Estado actualizado",
        "affectedRows": affected,
    })))
}

async fn delete_actividad(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    tracing::info!("🗑️ Solicitando eliminación de actividad ID: {}", id);
    let controller = ActividadController::new(&state);
    let eliminada = controller.eliminar(id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Actividad eliminada exitosamente",
        "actividadId": id,
        "titulo": eliminada.titulo,
        "imagenesEliminadas": eliminada.imagenes_eliminadas,
    })))
}

/// Servir una imagen de actividad por nombre; sin fallback, 404 si falta
async fn serve_imagen(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let path = state.storage.path_for(FileCategory::Actividades, &filename)?;

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok((
            [(header::CONTENT_TYPE, content_type_for(&filename))],
            bytes,
        )),
        Err(_) => Err(AppError::NotFound("Imagen no encontrada".to_string())),
    }
}
