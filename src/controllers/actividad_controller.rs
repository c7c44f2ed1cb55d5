//! Gestión de actividades con imágenes adjuntas

use crate::dto::actividad_dto::{ActividadConImagenes, ImagenConUrl};
use crate::models::actividad::ActividadConDetalle;
use crate::models::actor::{ActorRef, ActorRole};
use crate::repositories::actividad_repository::ActividadRepository;
use crate::state::AppState;
use crate::storage::{store_received, BlobStore, FileCategory, FormPayload};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{parse_date_field, parse_id_field, required_field};

/// Resultado de la creación de una actividad
pub struct ActividadCreada {
    pub actividad_id: i32,
    pub imagenes: usize,
}

/// Resultado de la eliminación de una actividad
pub struct ActividadEliminada {
    pub titulo: String,
    pub imagenes_eliminadas: usize,
}

pub struct ActividadController {
    repository: ActividadRepository,
    storage: BlobStore,
    public_url: String,
}

impl ActividadController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: ActividadRepository::new(state.pool.clone()),
            storage: state.storage.clone(),
            public_url: state.config.public_url.clone(),
        }
    }

    fn url_imagen(&self, ruta_archivo: &str) -> String {
        format!("{}/uploads/actividades/{}", self.public_url, ruta_archivo)
    }

    async fn con_imagenes(
        &self,
        actividades: Vec<ActividadConDetalle>,
    ) -> AppResult<Vec<ActividadConImagenes>> {
        let mut resultado = Vec::with_capacity(actividades.len());
        for actividad in actividades {
            let imagenes = self.repository.imagenes_de(actividad.id).await?;
            resultado.push(ActividadConImagenes {
                imagenes: imagenes
                    .into_iter()
                    .map(|imagen| ImagenConUrl {
                        url: self.url_imagen(&imagen.ruta_archivo),
                        imagen,
                    })
                    .collect(),
                actividad,
            });
        }
        Ok(resultado)
    }

    pub async fn crear(&self, payload: FormPayload) -> AppResult<ActividadCreada> {
        const CAMPOS_REQUERIDOS: &str =
            "Título, tipo de actividad, fecha de inicio, dirección, creador y tipo son requeridos";

        let titulo = required_field(payload.campo("titulo"), CAMPOS_REQUERIDOS)?.to_string();
        let tipo_actividad =
            required_field(payload.campo("tipo_actividad"), CAMPOS_REQUERIDOS)?.to_string();
        let fecha_inicio = parse_date_field(
            required_field(payload.campo("fecha_inicio"), CAMPOS_REQUERIDOS)?,
            "Fecha de inicio inválida",
        )?;
        let direccion_id = parse_id_field(
            required_field(payload.campo("direccion_id"), CAMPOS_REQUERIDOS)?,
            "Dirección inválida",
        )?;
        let creado_por_id = parse_id_field(
            required_field(payload.campo("creado_por_id"), CAMPOS_REQUERIDOS)?,
            "Creador inválido",
        )?;
        let creado_por_tipo = required_field(payload.campo("creado_por_tipo"), CAMPOS_REQUERIDOS)?;
        let creador_rol = ActorRole::parse(creado_por_tipo)
            .ok_or_else(|| AppError::Validation("Tipo de creador inválido".to_string()))?;

        let descripcion = payload.campo("descripcion").cloned().filter(|d| !d.is_empty());

        let fecha_fin = match payload.campo("fecha_fin") {
            Some(raw) if !raw.trim().is_empty() => {
                Some(parse_date_field(raw, "Fecha de fin inválida")?)
            }
            _ => None,
        };

        // La fecha de fin no puede ser anterior a la de inicio
        if let Some(fin) = fecha_fin {
            if fin < fecha_inicio {
                return Err(AppError::Validation(
                    "La fecha de fin no puede ser anterior a la fecha de inicio".to_string(),
                ));
            }
        }

        let imagenes =
            store_received(&self.storage, FileCategory::Actividades, &payload.archivos).await?;

        match self
            .repository
            .create(
                &titulo,
                descripcion.as_deref(),
                &tipo_actividad,
                fecha_inicio,
                fecha_fin,
                direccion_id,
                ActorRef::new(creado_por_id, creador_rol),
                &imagenes,
            )
            .await
        {
            Ok(actividad_id) => Ok(ActividadCreada {
                actividad_id,
                imagenes: imagenes.len(),
            }),
            Err(e) => {
                self.storage
                    .discard_all(FileCategory::Actividades, &imagenes)
                    .await;
                Err(e)
            }
        }
    }

    pub async fn listar_por_direccion(
        &self,
        direccion_id: i32,
    ) -> AppResult<Vec<ActividadConImagenes>> {
        let actividades = self.repository.list_by_direccion(direccion_id).await?;
        self.con_imagenes(actividades).await
    }

    pub async fn listar_todas(&self) -> AppResult<Vec<ActividadConImagenes>> {
        let actividades = self.repository.list_all().await?;
        self.con_imagenes(actividades).await
    }

    pub async fn actualizar_estado(&self, id: i32, estado: &str) -> AppResult<u64> {
        if estado.trim().is_empty() {
            return Err(AppError::Validation("El estado es requerido".to_string()));
        }
        self.repository.update_estado(id, estado).await
    }

    /// Eliminar una actividad: archivos físicos primero (best-effort),
    /// después las filas, hijas antes que padre.
    pub async fn eliminar(&self, id: i32) -> AppResult<ActividadEliminada> {
        let actividad = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Actividad no encontrada".to_string()))?;

        let imagenes = self.repository.imagenes_de(id).await?;
        let mut imagenes_eliminadas = 0;
        for imagen in &imagenes {
            if self
                .storage
                .delete(FileCategory::Actividades, &imagen.ruta_archivo)
                .await
            {
                imagenes_eliminadas += 1;
            }
        }

        self.repository.delete(id).await?;

        Ok(ActividadEliminada {
            titulo: actividad.titulo,
            imagenes_eliminadas,
        })
    }
}
