//! Modelo de Personal

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mapea a la tabla `personal`
#[derive(Debug, Clone, FromRow)]
pub struct Personal {
    pub id: i32,
    pub nombre_completo: String,
    pub puesto: String,
    pub direccion_id: i32,
    pub email: String,
    pub password: String,
    pub foto_perfil: Option<String>,
}

/// Personal con el nombre de su dirección (LEFT JOIN a `direcciones`)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PersonalConDireccion {
    pub id: i32,
    pub nombre_completo: String,
    pub puesto: String,
    pub direccion_id: i32,
    pub email: String,
    pub foto_perfil: Option<String>,
    pub direccion_nombre: Option<String>,
}
