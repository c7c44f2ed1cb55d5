use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::controllers::tarea_controller::TareaController;
use crate::dto::common::ApiResponse;
use crate::state::AppState;
use crate::storage::blob_store::content_type_for;
use crate::storage::multipart::TAREA_UPLOAD;
use crate::storage::{collect_form, FileCategory};
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
struct ActualizarAsignacionRequest {
    estado: String,
    comentarios: Option<String>,
    usuario_id: Option<i32>,
    usuario_tipo: Option<String>,
}

pub fn create_tarea_router() -> Router<AppState> {
    Router::new()
        .route("/tareas", get(list_tareas))
        .route("/tareas", post(create_tarea))
        .route("/tareas/usuarios-disponibles", get(usuarios_disponibles))
        .route("/tareas/asignacion/:id", put(update_asignacion))
        .route("/tareas/completar/:asignacion_id", post(completar_tarea))
        .route("/tareas/personal/:personal_id", get(tareas_de_personal))
        .route("/tareas/personal/:personal_id/conteo", get(conteo_pendientes))
        .route(
            "/tareas/archivo/:archivo",
            get(serve_archivo).delete(delete_archivo),
        )
        .route("/tareas/:id", get(get_tarea))
        .route("/tareas/:id", put(update_tarea))
        .route("/tareas/:id", delete(delete_tarea))
        // hasta 5 archivos de 10MB por formulario
        .layer(DefaultBodyLimit::max(60 * 1024 * 1024))
}

/// Personal disponible para recibir asignaciones
async fn usuarios_disponibles(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = TareaController::new(&state);
    let usuarios = controller.usuarios_asignables().await?;

    Ok(Json(json!({
        "success": true,
        "data": usuarios,
        "metadata": {
            "total": usuarios.len(),
        },
    })))
}

async fn create_tarea(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let payload = collect_form(multipart, TAREA_UPLOAD).await?;

    let controller = TareaController::new(&state);
    let creada = controller.crear(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Tarea creada exitosamente",
            "tareaId": creada.tarea_id,
            "asignaciones": creada.asignaciones,
            "archivos": creada.archivos,
        })),
    ))
}

async fn list_tareas(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = TareaController::new(&state);
    let tareas = controller.listar_todas().await?;

    Ok(Json(json!({
        "success": true,
        "data": tareas,
        "total": tareas.len(),
    })))
}

async fn get_tarea(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let controller = TareaController::new(&state);
    let tarea = controller.obtener(id).await?;

    Ok(Json(json!({
        "success": true,
        "data": tarea,
    })))
}

/// Actualización administrativa del estado de una asignación
async fn update_asignacion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ActualizarAsignacionRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = TareaController::new(&state);
    controller
        .actualizar_asignacion(
            id,
            &request.estado,
            request.comentarios.as_deref(),
            request.usuario_id,
            request.usuario_tipo.as_deref(),
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Estado actualizado correctamente",
    })))
}

/// El asignado completa su asignación con comentarios y/o archivos
async fn completar_tarea(
    State(state): State<AppState>,
    Path(asignacion_id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let payload = collect_form(multipart, TAREA_UPLOAD).await?;
    tracing::info!("✅ Completando tarea, asignación: {}", asignacion_id);

    let controller = TareaController::new(&state);
    let completada = controller.completar(asignacion_id, payload).await?;

    Ok(Json(ApiResponse::success_with_message(
        json!({
            "tarea": completada.tarea,
            "comentarios": completada.comentarios,
            "archivos": completada.archivos,
        }),
        "¡Felicidades! Tarea completada exitosamente".to_string(),
    )))
}

async fn update_tarea(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let payload = collect_form(multipart, TAREA_UPLOAD).await?;
    tracing::info!("📝 Editando tarea: {}", id);

    let controller = TareaController::new(&state);
    controller.editar(id, payload).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Tarea actualizada exitosamente",
    })))
}

async fn delete_tarea(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let controller = TareaController::new(&state);
    let archivos_eliminados = controller.eliminar(id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Tarea eliminada exitosamente",
        "archivosEliminados": archivos_eliminados,
    })))
}

/// Tareas asignadas a un personal, abiertas primero
async fn tareas_de_personal(
    State(state): State<AppState>,
    Path(personal_id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let controller = TareaController::new(&state);
    let tareas = controller.tareas_de_personal(personal_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": tareas,
    })))
}

/// Conteo de asignaciones abiertas, para el badge del cliente
async fn conteo_pendientes(
    State(state): State<AppState>,
    Path(personal_id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let controller = TareaController::new(&state);
    let pendientes = controller.conteo_pendientes(personal_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "pendientes": pendientes,
        },
    })))
}

/// Servir un archivo adjunto por nombre; 404 si no existe
async fn serve_archivo(
    State(state): State<AppState>,
    Path(archivo): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let path = state.storage.path_for(FileCategory::Tareas, &archivo)?;

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, content_type_for(&archivo))], bytes)),
        Err(_) => Err(AppError::NotFound("Archivo no encontrado".to_string())),
    }
}

/// Eliminar un archivo adjunto por id de fila
async fn delete_archivo(
    State(state): State<AppState>,
    Path(archivo): Path<String>,
) -> Result<Json<Value>, AppError> {
    let archivo_id: i32 = archivo
        .parse()
        .map_err(|_| AppError::Validation("Identificador de archivo inválido".to_string()))?;

    let controller = TareaController::new(&state);
    controller.eliminar_archivo(archivo_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Archivo eliminado",
    })))
}
