//! Modelo de Directivo

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mapea a la tabla `directivos`
#[derive(Debug, Clone, FromRow)]
pub struct Directivo {
    pub id: i32,
    pub nombre_completo: String,
    pub cargo: String,
    pub direccion_id: i32,
    pub email: String,
    pub password: String,
}

/// Directivo con el nombre de su dirección (LEFT JOIN a `direcciones`)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DirectivoConDireccion {
    pub id: i32,
    pub nombre_completo: String,
    pub cargo: String,
    pub direccion_id: i32,
    pub email: String,
    pub direccion_nombre: Option<String>,
}
