//! Recolección de formularios multipart
//!
//! Lee campos de texto y archivos de un `Multipart` de axum aplicando las
//! reglas de la ruta (cantidad, tamaño y tipo) ANTES de que nada toque la
//! base de datos o el disco.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::utils::errors::{AppError, AppResult};

/// Reglas de subida por ruta
#[derive(Debug, Clone, Copy)]
pub struct UploadRules {
    pub max_archivos: usize,
    pub max_tamano_bytes: usize,
    pub solo_imagenes: bool,
}

/// Imágenes de actividades: hasta 5, 5MB cada una
pub const ACTIVIDAD_UPLOAD: UploadRules = UploadRules {
    max_archivos: 5,
    max_tamano_bytes: 5 * 1024 * 1024,
    solo_imagenes: true,
};

/// Foto de perfil de personal: una sola, 2MB
pub const PERSONAL_UPLOAD: UploadRules = UploadRules {
    max_archivos: 1,
    max_tamano_bytes: 2 * 1024 * 1024,
    solo_imagenes: true,
};

/// Archivos de tareas: hasta 5, 10MB cada uno
pub const TAREA_UPLOAD: UploadRules = UploadRules {
    max_archivos: 5,
    max_tamano_bytes: 10 * 1024 * 1024,
    solo_imagenes: false,
};

/// Logo institucional: un solo archivo, 5MB
pub const LOGO_UPLOAD: UploadRules = UploadRules {
    max_archivos: 1,
    max_tamano_bytes: 5 * 1024 * 1024,
    solo_imagenes: false,
};

/// Un archivo recibido, todavía en memoria
#[derive(Debug, Clone)]
pub struct ReceivedFile {
    pub nombre_original: String,
    pub tipo_mime: String,
    pub datos: Vec<u8>,
}

/// Campos de texto + archivos de un formulario multipart
#[derive(Debug, Default)]
pub struct FormPayload {
    pub campos: HashMap<String, String>,
    pub archivos: Vec<ReceivedFile>,
}

impl FormPayload {
    pub fn campo(&self, name: &str) -> Option<&String> {
        self.campos.get(name)
    }
}

/// Consumir el multipart completo. Cualquier parte con nombre de archivo se
/// trata como subida; el resto como campo de texto.
pub async fn collect_form(mut multipart: Multipart, rules: UploadRules) -> AppResult<FormPayload> {
    let mut payload = FormPayload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Validation("Error procesando los datos del formulario".to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name() {
            if payload.archivos.len() >= rules.max_archivos {
                return Err(AppError::Validation(format!(
                    "Se permiten como máximo {} archivo(s)",
                    rules.max_archivos
                )));
            }

            let nombre_original = file_name.to_string();
            let tipo_mime = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();

            if rules.solo_imagenes && !tipo_mime.starts_with("image/") {
                return Err(AppError::Validation("Solo se permiten imágenes".to_string()));
            }

            let datos = field.bytes().await.map_err(|_| {
                AppError::Validation("Error procesando los datos del formulario".to_string())
            })?;

            if datos.len() > rules.max_tamano_bytes {
                return Err(AppError::Validation(format!(
                    "El archivo excede el tamaño máximo de {} MB",
                    rules.max_tamano_bytes / (1024 * 1024)
                )));
            }

            payload.archivos.push(ReceivedFile {
                nombre_original,
                tipo_mime,
                datos: datos.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(|_| {
                AppError::Validation("Error procesando los datos del formulario".to_string())
            })?;
            payload.campos.insert(name, value);
        }
    }

    Ok(payload)
}
