use serde::Serialize;

use crate::models::actividad::{ActividadConDetalle, ActividadImagen};

/// Imagen de actividad con su URL pública
#[derive(Debug, Serialize)]
pub struct ImagenConUrl {
    #[serde(flatten)]
    pub imagen: ActividadImagen,
    pub url: String,
}

/// Actividad con sus imágenes anidadas, lista para la respuesta
#[derive(Debug, Serialize)]
pub struct ActividadConImagenes {
    #[serde(flatten)]
    pub actividad: ActividadConDetalle,
    pub imagenes: Vec<ImagenConUrl>,
}
