//! Gestión de personal con foto de perfil
//!
//! La foto se reduce a 300×300 JPEG calidad 80 antes de guardarse; si la
//! recompresión falla se conserva el archivo original tal cual llegó.

use bcrypt::{hash, DEFAULT_COST};
use tracing::warn;

use crate::dto::personal_dto::{PersonalConFoto, PersonalMetadata};
use crate::models::personal::PersonalConDireccion;
use crate::repositories::personal_repository::PersonalRepository;
use crate::state::AppState;
use crate::storage::image::{compress_profile_photo, compressed_filename};
use crate::storage::{BlobStore, FileCategory, FormPayload, ReceivedFile};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{parse_id_field, required_field, validate_email};

const CAMPOS_REQUERIDOS: &str = "Todos los campos son requeridos";

pub struct PersonalController {
    repository: PersonalRepository,
    storage: BlobStore,
    public_url: String,
}

impl PersonalController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: PersonalRepository::new(state.pool.clone()),
            storage: state.storage.clone(),
            public_url: state.config.public_url.clone(),
        }
    }

    fn url_foto(&self, filename: &str) -> String {
        format!(
            "{}/api/university/personal/foto/{}",
            self.public_url, filename
        )
    }

    fn con_foto(&self, personal: PersonalConDireccion) -> PersonalConFoto {
        let foto_url = Some(self.url_foto(
            personal.foto_perfil.as_deref().unwrap_or("default-avatar.png"),
        ));
        PersonalConFoto {
            personal,
            foto_url,
        }
    }

    /// Guardar la foto recibida, pasándola por la recompresión con
    /// fallback al original
    async fn guardar_foto(&self, foto: &ReceivedFile) -> AppResult<String> {
        let nombre = BlobStore::generate_filename(FileCategory::Personal, &foto.nombre_original);

        match compress_profile_photo(&foto.datos) {
            Ok(jpeg) => {
                let nombre_comprimido = compressed_filename(&nombre);
                self.storage
                    .store(FileCategory::Personal, &nombre_comprimido, &jpeg)
                    .await?;
                Ok(nombre_comprimido)
            }
            Err(e) => {
                warn!("Error comprimiendo foto, se guarda el original: {}", e);
                self.storage
                    .store(FileCategory::Personal, &nombre, &foto.datos)
                    .await?;
                Ok(nombre)
            }
        }
    }

    pub async fn listar(&self) -> AppResult<(Vec<PersonalConFoto>, PersonalMetadata)> {
        let personal = self.repository.list().await?;

        let con_foto = personal.iter().filter(|p| p.foto_perfil.is_some()).count();
        let metadata = PersonalMetadata {
            total: personal.len(),
            con_foto,
            sin_foto: personal.len() - con_foto,
        };

        let listado = personal.into_iter().map(|p| self.con_foto(p)).collect();
        Ok((listado, metadata))
    }

    pub async fn obtener(&self, id: i32) -> AppResult<PersonalConFoto> {
        let personal = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Personal no encontrado".to_string()))?;

        // En la vista individual la URL solo se arma si hay foto propia
        let foto_url = personal.foto_perfil.as_deref().map(|f| self.url_foto(f));
        Ok(PersonalConFoto { personal, foto_url })
    }

    pub async fn crear(&self, payload: FormPayload) -> AppResult<(i32, bool)> {
        let nombre_completo =
            required_field(payload.campo("nombre_completo"), CAMPOS_REQUERIDOS)?.to_string();
        let puesto = required_field(payload.campo("puesto"), CAMPOS_REQUERIDOS)?.to_string();
        let direccion_id = parse_id_field(
            required_field(payload.campo("direccion_id"), CAMPOS_REQUERIDOS)?,
            "Dirección inválida",
        )?;
        let email = required_field(payload.campo("email"), CAMPOS_REQUERIDOS)?.to_string();
        let password = required_field(payload.campo("password"), CAMPOS_REQUERIDOS)?.to_string();

        validate_email(&email).map_err(|_| AppError::Validation("Email inválido".to_string()))?;

        let password_hash = hash(&password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        let foto_filename = match payload.archivos.first() {
            Some(foto) => Some(self.guardar_foto(foto).await?),
            None => None,
        };

        match self
            .repository
            .create(
                &nombre_completo,
                &puesto,
                direccion_id,
                &email,
                &password_hash,
                foto_filename.as_deref(),
            )
            .await
        {
            Ok(id) => Ok((id, foto_filename.is_some())),
            Err(e) => {
                // La inserción falló: la foto ya escrita se descarta
                if let Some(nombre) = foto_filename {
                    self.storage.delete(FileCategory::Personal, &nombre).await;
                }
                Err(e)
            }
        }
    }

    pub async fn actualizar(&self, id: i32, payload: FormPayload) -> AppResult<()> {
        let nombre_completo = required_field(
            payload.campo("nombre_completo"),
            "Nombre, puesto, dirección y email son requeridos",
        )?
        .to_string();
        let puesto = required_field(
            payload.campo("puesto"),
            "Nombre, puesto, dirección y email son requeridos",
        )?
        .to_string();
        let direccion_id = parse_id_field(
            required_field(
                payload.campo("direccion_id"),
                "Nombre, puesto, dirección y email son requeridos",
            )?,
            "Dirección inválida",
        )?;
        let email = required_field(
            payload.campo("email"),
            "Nombre, puesto, dirección y email son requeridos",
        )?
        .to_string();

        let actual = self
            .repository
            .find_raw(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Personal no encontrado".to_string()))?;

        // Foto nueva: reemplaza y borra la anterior
        let foto_perfil = match payload.archivos.first() {
            Some(foto) => {
                if let Some(anterior) = &actual.foto_perfil {
                    self.storage.delete(FileCategory::Personal, anterior).await;
                }
                Some(self.guardar_foto(foto).await?)
            }
            None => actual.foto_perfil.clone(),
        };

        // Contraseña nueva solo si llegó no vacía
        let password_hash = match payload.campo("password") {
            Some(p) if !p.trim().is_empty() => Some(
                hash(p, DEFAULT_COST)
                    .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?,
            ),
            _ => None,
        };

        self.repository
            .update(
                id,
                &nombre_completo,
                &puesto,
                direccion_id,
                &email,
                password_hash.as_deref(),
                foto_perfil.as_deref(),
            )
            .await
    }

    /// Eliminar personal: la foto física primero, luego la fila
    pub async fn eliminar(&self, id: i32) -> AppResult<()> {
        let persona = self
            .repository
            .find_raw(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Personal no encontrado".to_string()))?;

        if let Some(foto) = &persona.foto_perfil {
            self.storage.delete(FileCategory::Personal, foto).await;
        }

        self.repository.delete(id).await
    }
}
