//! Gestión de super usuarios

use bcrypt::{hash, DEFAULT_COST};
use serde::Deserialize;
use sqlx::PgPool;

use crate::models::super_user::SuperUserPublico;
use crate::repositories::super_user_repository::SuperUserRepository;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CrearSuperUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct SuperUserController {
    repository: SuperUserRepository,
}

impl SuperUserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SuperUserRepository::new(pool),
        }
    }

    pub async fn crear(&self, request: CrearSuperUserRequest) -> AppResult<i32> {
        let (username, email, password) = match (
            request.username.filter(|v| !v.trim().is_empty()),
            request.email.filter(|v| !v.trim().is_empty()),
            request.password.filter(|v| !v.is_empty()),
        ) {
            (Some(u), Some(e), Some(p)) => (u, e, p),
            _ => {
                return Err(AppError::Validation(
                    "Todos los campos son obligatorios".to_string(),
                ))
            }
        };

        let password_hash = hash(&password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        self.repository.create(&username, &email, &password_hash).await
    }

    pub async fn listar(&self) -> AppResult<Vec<SuperUserPublico>> {
        self.repository.list().await
    }
}
