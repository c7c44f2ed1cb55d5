//! Blob store respaldado por el sistema de archivos
//!
//! Los archivos se guardan bajo un directorio raíz con una subcarpeta por
//! categoría. Los nombres se generan como `<prefijo>-<millis>-<aleatorio>.<ext>`
//! para evitar colisiones.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};

use crate::utils::errors::{AppError, AppResult};

/// Categorías de almacenamiento, cada una con su subcarpeta y prefijo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Actividades,
    Personal,
    Tareas,
    Logos,
}

impl FileCategory {
    pub fn dir_name(&self) -> &'static str {
        match self {
            FileCategory::Actividades => "actividades",
            FileCategory::Personal => "personal",
            FileCategory::Tareas => "tareas",
            FileCategory::Logos => "logos",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            FileCategory::Actividades => "actividad",
            FileCategory::Personal => "personal",
            FileCategory::Tareas => "tarea",
            FileCategory::Logos => "logo",
        }
    }
}

/// Metadatos de un archivo ya guardado en disco
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub nombre_original: String,
    pub nombre_archivo: String,
    pub tipo_mime: String,
    pub tamano: i64,
}

/// Store de archivos en disco
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn category_dir(&self, category: FileCategory) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Ruta absoluta de un archivo dentro de su categoría.
    /// Rechaza nombres con separadores o `..` (los nombres servidos por
    /// URL nunca deben escapar del directorio de la categoría).
    pub fn path_for(&self, category: FileCategory, filename: &str) -> AppResult<PathBuf> {
        if !is_safe_filename(filename) {
            return Err(AppError::Validation("Nombre de archivo inválido".to_string()));
        }
        Ok(self.category_dir(category).join(filename))
    }

    /// Generar un nombre único conservando la extensión original
    pub fn generate_filename(category: FileCategory, original_name: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let random: u32 = rand::random();
        match Path::new(original_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}-{}-{}.{}", category.prefix(), millis, random, ext),
            None => format!("{}-{}-{}", category.prefix(), millis, random),
        }
    }

    /// Escribir bytes bajo la categoría dada, creando la carpeta si no existe
    pub async fn store(
        &self,
        category: FileCategory,
        filename: &str,
        bytes: &[u8],
    ) -> AppResult<()> {
        let dir = self.category_dir(category);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal(format!("Error creando directorio: {}", e)))?;

        let path = self.path_for(category, filename)?;
        fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Error guardando archivo: {}", e)))?;

        info!("💾 Archivo guardado: {}", path.display());
        Ok(())
    }

    /// Borrar un archivo. Best-effort: devuelve si se eliminó algo y nunca
    /// falla la operación que lo invoca.
    pub async fn delete(&self, category: FileCategory, filename: &str) -> bool {
        let path = match self.path_for(category, filename) {
            Ok(p) => p,
            Err(_) => return false,
        };
        match fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("⚠️ No se pudo eliminar {}: {}", path.display(), e);
                }
                false
            }
        }
    }

    pub async fn exists(&self, category: FileCategory, filename: &str) -> bool {
        match self.path_for(category, filename) {
            Ok(path) => fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Listar los nombres de archivo de una categoría
    pub async fn list(&self, category: FileCategory) -> AppResult<Vec<String>> {
        let dir = self.category_dir(category);
        if !fs::try_exists(&dir).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| AppError::Internal(format!("Error leyendo directorio: {}", e)))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::Internal(format!("Error leyendo directorio: {}", e)))?
        {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// Limpieza compensatoria: borrar todos los archivos de una llamada
    /// rechazada o cuya transacción falló. Best-effort.
    pub async fn discard_all(&self, category: FileCategory, files: &[StoredFile]) {
        for file in files {
            if self.delete(category, &file.nombre_archivo).await {
                info!("🗑️ Archivo descartado: {}", file.nombre_archivo);
            }
        }
    }
}

fn is_safe_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && !name.contains("..")
}

/// Content-Type a partir de la extensión, para servir archivos por nombre
pub fn content_type_for(filename: &str) -> &'static str {
    match Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("txt") => "text/plain; charset=utf-8",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> BlobStore {
        let dir = std::env::temp_dir().join(format!("blob-store-test-{}", rand::random::<u32>()));
        BlobStore::new(dir)
    }

    #[test]
    fn test_generate_filename_shape() {
        let name = BlobStore::generate_filename(FileCategory::Tareas, "informe.pdf");
        assert!(name.starts_with("tarea-"));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn test_generate_filename_without_extension() {
        let name = BlobStore::generate_filename(FileCategory::Logos, "logo");
        assert!(name.starts_with("logo-"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_generate_filename_unique() {
        let a = BlobStore::generate_filename(FileCategory::Actividades, "foto.png");
        let b = BlobStore::generate_filename(FileCategory::Actividades, "foto.png");
        assert_ne!(a, b);
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("foto.JPG"), "image/jpeg");
        assert_eq!(content_type_for("informe.pdf"), "application/pdf");
        assert_eq!(content_type_for("misterio.bin"), "application/octet-stream");
        assert_eq!(content_type_for("sin_extension"), "application/octet-stream");
    }

    #[test]
    fn test_unsafe_filenames_rejected() {
        let store = temp_store();
        assert!(store.path_for(FileCategory::Tareas, "../escape.txt").is_err());
        assert!(store.path_for(FileCategory::Tareas, "a/b.txt").is_err());
        assert!(store.path_for(FileCategory::Tareas, "").is_err());
        assert!(store.path_for(FileCategory::Tareas, "normal.txt").is_ok());
    }

    #[tokio::test]
    async fn test_store_exists_delete_roundtrip() {
        let store = temp_store();
        let name = BlobStore::generate_filename(FileCategory::Personal, "foto.jpg");

        assert!(!store.exists(FileCategory::Personal, &name).await);

        store
            .store(FileCategory::Personal, &name, b"bytes de prueba")
            .await
            .unwrap();
        assert!(store.exists(FileCategory::Personal, &name).await);
        assert!(store
            .list(FileCategory::Personal)
            .await
            .unwrap()
            .contains(&name));

        assert!(store.delete(FileCategory::Personal, &name).await);
        assert!(!store.exists(FileCategory::Personal, &name).await);
        // borrar de nuevo no falla, solo reporta que no había nada
        assert!(!store.delete(FileCategory::Personal, &name).await);
    }

    #[tokio::test]
    async fn test_discard_all_best_effort() {
        let store = temp_store();
        let name = BlobStore::generate_filename(FileCategory::Tareas, "a.txt");
        store
            .store(FileCategory::Tareas, &name, b"contenido")
            .await
            .unwrap();

        let files = vec![
            StoredFile {
                nombre_original: "a.txt".to_string(),
                nombre_archivo: name.clone(),
                tipo_mime: "text/plain".to_string(),
                tamano: 9,
            },
            StoredFile {
                nombre_original: "fantasma.txt".to_string(),
                nombre_archivo: "tarea-0-0.txt".to_string(),
                tipo_mime: "text/plain".to_string(),
                tamano: 0,
            },
        ];

        // no debe fallar aunque el segundo archivo no exista
        store.discard_all(FileCategory::Tareas, &files).await;
        assert!(!store.exists(FileCategory::Tareas, &name).await);
    }
}
