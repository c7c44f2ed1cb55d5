use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::super_user_controller::{CrearSuperUserRequest, SuperUserController};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_super_user_router() -> Router<AppState> {
    Router::new()
        .route("/create-superuser", post(create_superuser))
        .route("/superusers", get(list_superusers))
}

async fn create_superuser(
    State(state): State<AppState>,
    Json(request): Json<CrearSuperUserRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let controller = SuperUserController::new(state.pool.clone());
    let user_id = controller.crear(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Super usuario creado exitosamente",
            "userId": user_id,
        })),
    ))
}

async fn list_superusers(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let controller = SuperUserController::new(state.pool.clone());
    let users = controller.listar().await?;

    Ok(Json(json!({
        "success": true,
        "data": users,
    })))
}
