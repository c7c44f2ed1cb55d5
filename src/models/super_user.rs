//! Modelo de SuperUser

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mapea a la tabla `super_users`
#[derive(Debug, Clone, FromRow)]
pub struct SuperUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Versión pública, sin el hash de contraseña
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SuperUserPublico {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
