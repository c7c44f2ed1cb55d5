//! Resolución de identidad
//!
//! El login general sondea las tres tablas de actores en orden fijo:
//! super_users, directivos, personal. Solo se avanza a la siguiente tabla
//! cuando la actual NO tiene fila para ese email; un email existente con
//! contraseña incorrecta corta ahí mismo con 401, sin segunda oportunidad
//! en otra tabla. El error es uniforme: nunca se revela si falló el email
//! o la contraseña.

use bcrypt::verify;
use sqlx::PgPool;
use tracing::info;

use crate::dto::auth_dto::{LoginRequest, UsuarioLogin};
use crate::repositories::actor_repository::ActorRepository;
use crate::utils::errors::{AppError, AppResult};

const CREDENCIALES_INVALIDAS: &str = "Credenciales inválidas";

pub struct AuthController {
    repository: ActorRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ActorRepository::new(pool),
        }
    }

    fn validate(request: &LoginRequest) -> AppResult<()> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AppError::Validation(
                "Email y contraseña son requeridos".to_string(),
            ));
        }
        Ok(())
    }

    fn verify_password(plaintext: &str, hash: &str) -> AppResult<bool> {
        verify(plaintext, hash)
            .map_err(|e| AppError::Internal(format!("Error verifying password: {}", e)))
    }

    /// Login exclusivo de super usuarios
    pub async fn login(&self, request: LoginRequest) -> AppResult<UsuarioLogin> {
        Self::validate(&request)?;

        let user = self
            .repository
            .find_super_user_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()))?;

        if !Self::verify_password(&request.password, &user.password)? {
            return Err(AppError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()));
        }

        info!("✅ Login exitoso para: {}", user.email);
        Ok(UsuarioLogin::superadmin(user.id, user.username, user.email))
    }

    /// Login general para los tres roles
    pub async fn login_general(&self, request: LoginRequest) -> AppResult<UsuarioLogin> {
        Self::validate(&request)?;
        let email = request.email.trim();

        // Sonda 1: super usuarios. Si la fila existe, el veredicto se decide
        // aquí; una contraseña errada NO sigue probando las otras tablas.
        if let Some(user) = self.repository.find_super_user_by_email(email).await? {
            if !Self::verify_password(&request.password, &user.password)? {
                return Err(AppError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()));
            }
            info!("✅ Login exitoso para: {} Tipo: superadmin", user.email);
            return Ok(UsuarioLogin::superadmin(user.id, user.username, user.email));
        }

        // Sonda 2: directivos
        if let Some(directivo) = self.repository.find_directivo_by_email(email).await? {
            if !Self::verify_password(&request.password, &directivo.password)? {
                return Err(AppError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()));
            }
            info!(
                "✅ Login exitoso para: {} Tipo: directivo",
                directivo.email
            );
            return Ok(UsuarioLogin::directivo(
                directivo.id,
                directivo.nombre_completo,
                directivo.email,
                directivo.cargo,
                directivo.direccion_id,
                directivo.direccion_nombre,
            ));
        }

        // Sonda 3: personal
        if let Some(personal) = self.repository.find_personal_by_email(email).await? {
            if !Self::verify_password(&request.password, &personal.password)? {
                return Err(AppError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()));
            }
            info!("✅ Login exitoso para: {} Tipo: personal", personal.email);
            return Ok(UsuarioLogin::personal(
                personal.id,
                personal.nombre_completo,
                personal.email,
                personal.puesto,
                personal.direccion_id,
                personal.direccion_nombre,
            ));
        }

        Err(AppError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()))
    }
}
