use serde::Serialize;

use crate::models::personal::PersonalConDireccion;

/// Personal con la URL de su foto resuelta (o la del avatar por defecto)
#[derive(Debug, Serialize)]
pub struct PersonalConFoto {
    #[serde(flatten)]
    pub personal: PersonalConDireccion,
    pub foto_url: Option<String>,
}

/// Metadatos del listado de personal
#[derive(Debug, Serialize)]
pub struct PersonalMetadata {
    pub total: usize,
    #[serde(rename = "conFoto")]
    pub con_foto: usize,
    #[serde(rename = "sinFoto")]
    pub sin_foto: usize,
}
