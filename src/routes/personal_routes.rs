use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::personal_controller::PersonalController;
use crate::dto::common::ApiResponse;
use crate::state::AppState;
use crate::storage::blob_store::content_type_for;
use crate::storage::multipart::PERSONAL_UPLOAD;
use crate::storage::{collect_form, FileCategory};
use crate::utils::errors::AppError;

pub fn create_personal_router() -> Router<AppState> {
    Router::new()
        .route("/personal", get(list_personal))
        .route("/personal", post(create_personal))
        .route("/personal/:id", get(get_personal))
        .route("/personal/:id", put(update_personal))
        .route("/personal/:id", delete(delete_personal))
        .route("/personal/foto/:filename", get(serve_foto))
        // la foto viaja en el mismo formulario que los datos
        .layer(DefaultBodyLimit::max(5 * 1024 * 1024))
}

async fn list_personal(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = PersonalController::new(&state);
    let (personal, metadata) = controller.listar().await?;

    Ok(Json(json!({
        "success": true,
        "data": personal,
        "metadata": metadata,
    })))
}

async fn get_personal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let controller = PersonalController::new(&state);
    let persona = controller.obtener(id).await?;

    Ok(Json(json!({
        "success": true,
        "data": persona,
    })))
}

async fn create_personal(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let payload = collect_form(multipart, PERSONAL_UPLOAD).await?;

    let controller = PersonalController::new(&state);
    let (personal_id, tiene_foto) = controller.crear(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Personal creado exitosamente",
            "personalId": personal_id,
            "tieneFoto": tiene_foto,
        })),
    ))
}

async fn update_personal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let payload = collect_form(multipart, PERSONAL_UPLOAD).await?;

    let controller = PersonalController::new(&state);
    controller.actualizar(id, payload).await?;

    Ok(Json(ApiResponse::message_only(
        "Personal actualizado exitosamente".to_string(),
    )))
}

async fn delete_personal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = PersonalController::new(&state);
    controller.eliminar(id).await?;

    Ok(Json(ApiResponse::message_only(
        "Personal eliminado exitosamente".to_string(),
    )))
}

/// Servir la foto de un personal; si no existe se sirve el avatar por defecto
async fn serve_foto(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let path = state.storage.path_for(FileCategory::Personal, &filename)?;

    if let Ok(bytes) = tokio::fs::read(&path).await {
        return Ok((
            [(header::CONTENT_TYPE, content_type_for(&filename))],
            bytes,
        )
            .into_response());
    }

    // Avatar por defecto para fotos faltantes
    match tokio::fs::read("public/default-avatar.png").await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response()),
        Err(_) => Err(AppError::NotFound("Foto no encontrada".to_string())),
    }
}
