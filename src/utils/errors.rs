//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP con el sobre `{success, error}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

lazy_static::lazy_static! {
    static ref IS_PRODUCTION: bool = std::env::var("ENVIRONMENT")
        .map(|e| e == "production")
        .unwrap_or(false);
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, detalle) = match self {
            AppError::Database(e) => {
                tracing::error!("Error de base de datos: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error en el servidor".to_string(),
                    Some(e.to_string()),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            // La violación de unicidad se reporta como 400, igual que la validación
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Internal(msg) => {
                tracing::error!("Error interno: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error en el servidor".to_string(),
                    Some(msg),
                )
            }
        };

        let mut body = json!({
            "success": false,
            "error": error,
        });

        // El detalle interno solo se expone fuera de producción
        if !*IS_PRODUCTION {
            if let Some(d) = detalle {
                body["detalle"] = json!(d);
            }
        }

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Convierte una violación de unicidad (SQLSTATE 23505) en un `Conflict`
/// con mensaje propio; cualquier otro error pasa sin tocar.
pub fn map_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return AppError::Conflict(message.to_string());
        }
    }
    AppError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_unique_violation_passthrough() {
        // Un error que no es de BD debe pasar sin convertirse en Conflict
        let err = map_unique_violation(sqlx::Error::RowNotFound, "duplicado");
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_conflict_message() {
        let err = AppError::Conflict("El email ya está registrado".to_string());
        assert_eq!(err.to_string(), "Conflict: El email ya está registrado");
    }
}
