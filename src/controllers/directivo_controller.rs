//! Gestión de directivos

use bcrypt::{hash, DEFAULT_COST};
use serde::Deserialize;
use sqlx::PgPool;

use crate::models::directivo::DirectivoConDireccion;
use crate::repositories::directivo_repository::DirectivoRepository;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CrearDirectivoRequest {
    pub nombre_completo: Option<String>,
    pub cargo: Option<String>,
    pub direccion_id: Option<i32>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActualizarDirectivoRequest {
    pub nombre_completo: Option<String>,
    pub cargo: Option<String>,
    pub direccion_id: Option<i32>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct DirectivoController {
    repository: DirectivoRepository,
}

impl DirectivoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DirectivoRepository::new(pool),
        }
    }

    pub async fn listar(&self) -> AppResult<Vec<DirectivoConDireccion>> {
        self.repository.list().await
    }

    pub async fn crear(&self, request: CrearDirectivoRequest) -> AppResult<i32> {
        let (nombre_completo, cargo, direccion_id, email, password) = match (
            request.nombre_completo.filter(|v| !v.trim().is_empty()),
            request.cargo.filter(|v| !v.trim().is_empty()),
            request.direccion_id,
            request.email.filter(|v| !v.trim().is_empty()),
            request.password.filter(|v| !v.is_empty()),
        ) {
            (Some(n), Some(c), Some(d), Some(e), Some(p)) => (n, c, d, e, p),
            _ => {
                return Err(AppError::Validation(
                    "Todos los campos son requeridos".to_string(),
                ))
            }
        };

        let password_hash = hash(&password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        self.repository
            .create(&nombre_completo, &cargo, direccion_id, &email, &password_hash)
            .await
    }

    pub async fn actualizar(
        &self,
        id: i32,
        request: ActualizarDirectivoRequest,
    ) -> AppResult<()> {
        let (nombre_completo, cargo, direccion_id, email) = match (
            request.nombre_completo.filter(|v| !v.trim().is_empty()),
            request.cargo.filter(|v| !v.trim().is_empty()),
            request.direccion_id,
            request.email.filter(|v| !v.trim().is_empty()),
        ) {
            (Some(n), Some(c), Some(d), Some(e)) => (n, c, d, e),
            _ => {
                return Err(AppError::Validation(
                    "Nombre, cargo, dirección y email son requeridos".to_string(),
                ))
            }
        };

        // La contraseña solo se re-hashea cuando llegó una nueva
        let password_hash = match request.password {
            Some(p) if !p.trim().is_empty() => Some(
                hash(&p, DEFAULT_COST)
                    .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?,
            ),
            _ => None,
        };

        self.repository
            .update(
                id,
                &nombre_completo,
                &cargo,
                direccion_id,
                &email,
                password_hash.as_deref(),
            )
            .await
    }

    pub async fn eliminar(&self, id: i32) -> AppResult<()> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Directivo no encontrado".to_string()))?;

        self.repository.delete(id).await
    }
}
