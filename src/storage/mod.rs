//! Almacenamiento de archivos subidos
//!
//! Este módulo contiene el blob store en disco, la recompresión de fotos
//! de perfil y la recolección de formularios multipart.

pub mod blob_store;
pub mod image;
pub mod multipart;

pub use blob_store::{BlobStore, FileCategory, StoredFile};
pub use multipart::{collect_form, FormPayload, ReceivedFile, UploadRules};

use crate::utils::errors::AppResult;

/// Guardar en disco todos los archivos recibidos de una llamada. Si alguno
/// falla, los ya escritos se descartan antes de devolver el error: una
/// llamada rechazada nunca deja archivos huérfanos.
pub async fn store_received(
    store: &BlobStore,
    category: FileCategory,
    recibidos: &[ReceivedFile],
) -> AppResult<Vec<StoredFile>> {
    let mut guardados = Vec::with_capacity(recibidos.len());

    for recibido in recibidos {
        let nombre_archivo = BlobStore::generate_filename(category, &recibido.nombre_original);
        if let Err(e) = store.store(category, &nombre_archivo, &recibido.datos).await {
            store.discard_all(category, &guardados).await;
            return Err(e);
        }
        guardados.push(StoredFile {
            nombre_original: recibido.nombre_original.clone(),
            nombre_archivo,
            tipo_mime: recibido.tipo_mime.clone(),
            tamano: recibido.datos.len() as i64,
        });
    }

    Ok(guardados)
}
