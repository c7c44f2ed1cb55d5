//! Modelo de Comunicado

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Comunicado con el nombre del super usuario que lo publicó
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ComunicadoConPublicador {
    pub id: i32,
    pub titulo: String,
    pub contenido: String,
    pub link_externo: Option<String>,
    pub publicado_por_id: i32,
    pub estado: String,
    pub fecha_publicacion: DateTime<Utc>,
    pub publicado_por_nombre: Option<String>,
}
