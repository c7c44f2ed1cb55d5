//! Modelo de Direccion (unidad organizacional)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mapea a la tabla `direcciones`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Direccion {
    pub id: i32,
    pub nombre: String,
}
