//! Gestión de comunicados

use crate::models::comunicado::ComunicadoConPublicador;
use crate::repositories::comunicado_repository::ComunicadoRepository;
use crate::utils::errors::{AppError, AppResult};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Deserialize)]
pub struct CrearComunicadoRequest {
    pub titulo: Option<String>,
    pub contenido: Option<String>,
    pub link_externo: Option<String>,
    pub publicado_por_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ActualizarComunicadoRequest {
    pub titulo: String,
    pub contenido: String,
    pub link_externo: Option<String>,
    pub estado: String,
}

pub struct ComunicadoController {
    repository: ComunicadoRepository,
}

impl ComunicadoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ComunicadoRepository::new(pool),
        }
    }

    pub async fn crear(&self, request: CrearComunicadoRequest) -> AppResult<i32> {
        let titulo = request
            .titulo
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AppError::Validation("Título, contenido y creador son requeridos".to_string())
            })?;
        let contenido = request
            .contenido
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                AppError::Validation("Título, contenido y creador son requeridos".to_string())
            })?;
        let publicado_por_id = request.publicado_por_id.ok_or_else(|| {
            AppError::Validation("Título, contenido y creador son requeridos".to_string())
        })?;

        let link_externo = request.link_externo.as_deref().filter(|l| !l.is_empty());

        self.repository
            .create(titulo, contenido, link_externo, publicado_por_id)
            .await
    }

    pub async fn listar_publicados(&self) -> AppResult<Vec<ComunicadoConPublicador>> {
        self.repository.list_publicados().await
    }

    pub async fn listar_todos(&self) -> AppResult<Vec<ComunicadoConPublicador>> {
        self.repository.list_todos().await
    }

    pub async fn obtener(&self, id: i32) -> AppResult<ComunicadoConPublicador> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comunicado no encontrado".to_string()))
    }

    pub async fn recientes(&self, limit: i64) -> AppResult<Vec<ComunicadoConPublicador>> {
        self.repository.recientes(limit).await
    }

    pub async fn actualizar(
        &self,
        id: i32,
        request: ActualizarComunicadoRequest,
    ) -> AppResult<()> {
        let link_externo = request.link_externo.as_deref().filter(|l| !l.is_empty());
        self.repository
            .update(id, &request.titulo, &request.contenido, link_externo, &request.estado)
            .await
    }

    pub async fn eliminar(&self, id: i32) -> AppResult<()> {
        self.repository.delete(id).await
    }
}
