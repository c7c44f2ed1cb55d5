use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginGeneralResponse, LoginRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Configura las rutas de autenticación
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/login-general", post(login_general))
}

/// Login exclusivo de super usuarios
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    tracing::info!("🔐 Intento de login para: {}", request.email);
    let controller = AuthController::new(state.pool.clone());
    let user = controller.login(request).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Login exitoso",
        "user": user,
    })))
}

/// Login general: resuelve el rol sondeando las tres tablas
async fn login_general(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginGeneralResponse>, AppError> {
    tracing::info!("🔐 Login general para: {}", request.email);
    let controller = AuthController::new(state.pool.clone());
    let user = controller.login_general(request).await?;

    Ok(Json(LoginGeneralResponse::new(user)))
}
