use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::state::AppState;
use crate::storage::multipart::LOGO_UPLOAD;
use crate::storage::{collect_form, FileCategory};
use crate::utils::errors::AppError;

/// El logo institucional vive bajo un nombre fijo, solo cambia la extensión
const LOGO_BASENAME: &str = "institution-logo";

pub fn create_logo_router() -> Router<AppState> {
    Router::new()
        .route("/upload-logo", post(upload_logo))
        .route("/delete-logo", delete(delete_logo))
        .route("/check-logo", get(check_logo))
        .layer(DefaultBodyLimit::max(8 * 1024 * 1024))
}

async fn upload_logo(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    tracing::info!("📤 Subiendo logo...");
    let payload = collect_form(multipart, LOGO_UPLOAD).await?;

    let logo = payload
        .archivos
        .first()
        .ok_or_else(|| AppError::Validation("No se recibió ningún archivo".to_string()))?;

    let ext = std::path::Path::new(&logo.nombre_original)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    let filename = format!("{}.{}", LOGO_BASENAME, ext);

    // Eliminar cualquier logo anterior antes de escribir el nuevo
    for existente in state.storage.list(FileCategory::Logos).await? {
        if existente.starts_with(LOGO_BASENAME) {
            state.storage.delete(FileCategory::Logos, &existente).await;
        }
    }

    state
        .storage
        .store(FileCategory::Logos, &filename, &logo.datos)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Logo subido exitosamente",
        "filename": filename,
    })))
}

async fn delete_logo(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    tracing::info!("🗑️ Eliminando logo...");

    let mut deleted_count = 0;
    for existente in state.storage.list(FileCategory::Logos).await? {
        if existente.starts_with(LOGO_BASENAME)
            && state.storage.delete(FileCategory::Logos, &existente).await
        {
            deleted_count += 1;
        }
    }

    Ok(Json(json!({
        "success": true,
        "message": "Logo eliminado",
        "deletedCount": deleted_count,
    })))
}

async fn check_logo(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let logo = state
        .storage
        .list(FileCategory::Logos)
        .await?
        .into_iter()
        .find(|f| f.starts_with(LOGO_BASENAME));

    let Some(filename) = logo else {
        return Ok(Json(json!({
            "success": false,
            "exists": false,
            "message": "No hay logo",
        })));
    };

    let path = state.storage.path_for(FileCategory::Logos, &filename)?;
    let size = tokio::fs::metadata(&path)
        .await
        .map(|m| m.len())
        .unwrap_or(0);

    Ok(Json(json!({
        "success": true,
        "exists": true,
        "filename": filename,
        "size": size,
        "url": format!("{}/uploads/logos/{}", state.config.public_url, filename),
    })))
}
