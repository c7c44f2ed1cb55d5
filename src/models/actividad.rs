//! Modelos de Actividad y sus imágenes

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mapea a la tabla `actividades`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Actividad {
    pub id: i32,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub tipo_actividad: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: Option<NaiveDate>,
    pub direccion_id: i32,
    pub creado_por_id: i32,
    pub creado_por_tipo: String,
    pub estado: String,
    pub fecha_creacion: DateTime<Utc>,
}

/// Actividad con los nombres resueltos de dirección y creador.
/// El creador se resuelve por despacho sobre `(creado_por_id, creado_por_tipo)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActividadConDetalle {
    pub id: i32,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub tipo_actividad: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: Option<NaiveDate>,
    pub direccion_id: i32,
    pub creado_por_id: i32,
    pub creado_por_tipo: String,
    pub estado: String,
    pub fecha_creacion: DateTime<Utc>,
    pub direccion_nombre: Option<String>,
    pub creado_por_nombre: String,
}

/// Mapea a la tabla `actividad_imagenes`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActividadImagen {
    pub id: i32,
    pub actividad_id: i32,
    pub nombre_archivo: String,
    pub ruta_archivo: String,
    pub tipo_mime: String,
    pub tamano: i64,
    pub fecha_subida: DateTime<Utc>,
}
