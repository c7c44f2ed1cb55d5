//! Motor del flujo de tareas
//!
//! Orquesta las operaciones multi-entidad: valida antes de cualquier efecto,
//! guarda los archivos recibidos, delega la escritura transaccional al
//! repositorio y, si la transacción falla, descarta los archivos como acción
//! compensatoria (el disco no participa de la transacción).

use chrono::Utc;

use crate::dto::tarea_dto::{
    parse_asignaciones, ArchivoConUrl, AsignacionEntrada, TareaAsignada, TareaDetalle,
    TareaResumen,
};
use crate::models::actor::{ActorRef, ActorRole};
use crate::models::tarea::{calcular_progreso, dias_restantes, EstadoAsignacion, TareaArchivo};
use crate::repositories::actor_repository::ActorRepository;
use crate::repositories::tarea_repository::{TareaRepository, UsuarioAsignable};
use crate::state::AppState;
use crate::storage::{store_received, BlobStore, FileCategory, FormPayload};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{parse_date_field, parse_id_field, required_field};

/// Resultado de la creación de una tarea
pub struct TareaCreada {
    pub tarea_id: i32,
    pub asignaciones: usize,
    pub archivos: usize,
}

/// Resultado de completar una asignación
pub struct AsignacionCompletada {
    pub tarea: String,
    pub comentarios: Option<String>,
    pub archivos: usize,
}

pub struct TareaController {
    repository: TareaRepository,
    actores: ActorRepository,
    storage: BlobStore,
    public_url: String,
}

impl TareaController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: TareaRepository::new(state.pool.clone()),
            actores: ActorRepository::new(state.pool.clone()),
            storage: state.storage.clone(),
            public_url: state.config.public_url.clone(),
        }
    }

    fn url_archivo(&self, ruta_archivo: &str) -> String {
        format!("{}/uploads/tareas/{}", self.public_url, ruta_archivo)
    }

    fn con_urls(&self, archivos: Vec<TareaArchivo>) -> Vec<ArchivoConUrl> {
        archivos
            .into_iter()
            .map(|archivo| ArchivoConUrl {
                url: self.url_archivo(&archivo.ruta_archivo),
                archivo,
            })
            .collect()
    }

    /// La referencia etiquetada solo es válida si la fila existe en la tabla
    /// que nombra el rol; las tres tablas son disjuntas y la base no puede
    /// comprobarlo sola.
    async fn validar_asignados(&self, asignaciones: &[AsignacionEntrada]) -> AppResult<()> {
        for asignacion in asignaciones {
            let role = ActorRole::parse(&asignacion.usuario_tipo).ok_or_else(|| {
                AppError::Validation("Formato de asignaciones inválido".to_string())
            })?;
            let actor = ActorRef::new(asignacion.usuario_id, role);
            if !self.actores.exists(actor).await? {
                return Err(AppError::Validation(format!(
                    "El usuario asignado {} ({}) no existe",
                    asignacion.usuario_id, asignacion.usuario_tipo
                )));
            }
        }
        Ok(())
    }

    pub async fn usuarios_asignables(&self) -> AppResult<Vec<UsuarioAsignable>> {
        self.repository.usuarios_asignables().await
    }

    /// Crear una tarea con sus asignaciones, archivos e historial
    pub async fn crear(&self, payload: FormPayload) -> AppResult<TareaCreada> {
        // Validación completa antes de cualquier efecto
        let titulo = required_field(payload.campo("titulo"), "Todos los campos son requeridos")?
            .to_string();
        let fecha_entrega = parse_date_field(
            required_field(payload.campo("fecha_entrega"), "Todos los campos son requeridos")?,
            "Fecha de entrega inválida",
        )?;
        let creado_por_id = parse_id_field(
            required_field(payload.campo("creado_por_id"), "Todos los campos son requeridos")?,
            "Creador inválido",
        )?;
        let creado_por_tipo = payload
            .campo("creado_por_tipo")
            .map(|s| s.as_str())
            .unwrap_or("superadmin");
        let creador_rol = ActorRole::parse(creado_por_tipo)
            .ok_or_else(|| AppError::Validation("Tipo de creador inválido".to_string()))?;
        let descripcion = payload.campo("descripcion").cloned().filter(|d| !d.is_empty());

        let raw_asignaciones =
            required_field(payload.campo("asignaciones"), "Todos los campos son requeridos")?;
        let asignaciones = parse_asignaciones(raw_asignaciones)?;

        let creador = ActorRef::new(creado_por_id, creador_rol);
        if !self.actores.exists(creador).await? {
            return Err(AppError::Validation("El creador indicado no existe".to_string()));
        }
        self.validar_asignados(&asignaciones).await?;

        // Archivos a disco primero; las filas que los referencian después
        let archivos = store_received(&self.storage, FileCategory::Tareas, &payload.archivos).await?;

        match self
            .repository
            .crear_tarea(
                &titulo,
                descripcion.as_deref(),
                fecha_entrega,
                creador,
                &asignaciones,
                &archivos,
            )
            .await
        {
            Ok(tarea_id) => {
                tracing::info!(
                    "✅ Tarea {} creada con {} archivos",
                    tarea_id,
                    archivos.len()
                );
                Ok(TareaCreada {
                    tarea_id,
                    asignaciones: asignaciones.len(),
                    archivos: archivos.len(),
                })
            }
            Err(e) => {
                // Acción compensatoria: la transacción ya revirtió
                self.storage.discard_all(FileCategory::Tareas, &archivos).await;
                Err(e)
            }
        }
    }

    pub async fn listar_todas(&self) -> AppResult<Vec<TareaResumen>> {
        let tareas = self.repository.listar_todas().await?;

        let mut resumenes = Vec::with_capacity(tareas.len());
        for tarea in tareas {
            let asignaciones = self.repository.asignaciones_de(tarea.id).await?;
            let archivos = self.repository.archivos_de(tarea.id).await?;
            let progreso = calcular_progreso(tarea.completadas, tarea.total_asignaciones);

            resumenes.push(TareaResumen {
                id: tarea.id,
                titulo: tarea.titulo,
                descripcion: tarea.descripcion,
                fecha_entrega: tarea.fecha_entrega,
                creado_por_id: tarea.creado_por_id,
                creado_por_tipo: tarea.creado_por_tipo,
                fecha_creacion: tarea.fecha_creacion,
                creado_por_nombre: tarea.creado_por_nombre,
                total_asignaciones: tarea.total_asignaciones,
                completadas: tarea.completadas,
                pendientes: tarea.pendientes,
                en_progreso: tarea.en_progreso,
                progreso,
                asignaciones,
                archivos: self.con_urls(archivos),
            });
        }

        Ok(resumenes)
    }

    pub async fn obtener(&self, id: i32) -> AppResult<TareaDetalle> {
        let tarea = self
            .repository
            .obtener(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tarea no encontrada".to_string()))?;

        let asignaciones = self.repository.asignaciones_de(id).await?;
        let archivos = self.repository.archivos_de(id).await?;
        let historial = self.repository.historial_de(id).await?;

        Ok(TareaDetalle {
            id: tarea.id,
            titulo: tarea.titulo,
            descripcion: tarea.descripcion,
            fecha_entrega: tarea.fecha_entrega,
            creado_por_id: tarea.creado_por_id,
            creado_por_tipo: tarea.creado_por_tipo,
            fecha_creacion: tarea.fecha_creacion,
            creado_por_nombre: tarea.creado_por_nombre,
            asignaciones,
            archivos: self.con_urls(archivos),
            historial,
        })
    }

    /// Completar una asignación con evidencia: comentarios y/o archivos.
    /// Re-completar sobreescribe comentarios y fecha, nunca es error.
    pub async fn completar(
        &self,
        asignacion_id: i32,
        payload: FormPayload,
    ) -> AppResult<AsignacionCompletada> {
        let comentarios = payload
            .campo("comentarios")
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        if comentarios.is_none() && payload.archivos.is_empty() {
            return Err(AppError::Validation(
                "Debes agregar una descripción o un archivo para completar la tarea".to_string(),
            ));
        }

        let asignacion = self
            .repository
            .encontrar_asignacion(asignacion_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asignación no encontrada".to_string()))?;

        let archivos = store_received(&self.storage, FileCategory::Tareas, &payload.archivos).await?;

        match self
            .repository
            .completar_asignacion(&asignacion, comentarios.as_deref(), &archivos)
            .await
        {
            Ok(()) => Ok(AsignacionCompletada {
                tarea: asignacion.titulo,
                comentarios,
                archivos: archivos.len(),
            }),
            Err(e) => {
                self.storage.discard_all(FileCategory::Tareas, &archivos).await;
                Err(e)
            }
        }
    }

    /// Actualización administrativa del estado de una asignación
    pub async fn actualizar_asignacion(
        &self,
        asignacion_id: i32,
        estado: &str,
        comentarios: Option<&str>,
        usuario_id: Option<i32>,
        usuario_tipo: Option<&str>,
    ) -> AppResult<()> {
        let estado = EstadoAsignacion::parse(estado)
            .ok_or_else(|| AppError::Validation("Estado inválido".to_string()))?;

        let role = match usuario_tipo {
            Some(tipo) => ActorRole::parse(tipo)
                .ok_or_else(|| AppError::Validation("Tipo de usuario inválido".to_string()))?,
            None => ActorRole::SuperAdmin,
        };
        let actor = ActorRef::new(usuario_id.unwrap_or(1), role);

        self.repository
            .actualizar_asignacion(asignacion_id, estado, comentarios, actor)
            .await
    }

    /// Editar una tarea. Si llegan asignaciones, reemplazan el conjunto
    /// completo y vuelven a `pendiente`.
    pub async fn editar(&self, id: i32, payload: FormPayload) -> AppResult<()> {
        let titulo = required_field(payload.campo("titulo"), "El título es requerido")?.to_string();
        let fecha_entrega = parse_date_field(
            required_field(payload.campo("fecha_entrega"), "La fecha de entrega es requerida")?,
            "Fecha de entrega inválida",
        )?;
        let descripcion = payload.campo("descripcion").cloned().filter(|d| !d.is_empty());

        let nuevas_asignaciones = match payload.campo("asignaciones") {
            Some(raw) if !raw.trim().is_empty() => {
                let asignaciones = parse_asignaciones(raw)?;
                self.validar_asignados(&asignaciones).await?;
                Some(asignaciones)
            }
            _ => None,
        };

        let archivos = store_received(&self.storage, FileCategory::Tareas, &payload.archivos).await?;

        match self
            .repository
            .editar_tarea(
                id,
                &titulo,
                descripcion.as_deref(),
                fecha_entrega,
                nuevas_asignaciones.as_deref(),
                &archivos,
            )
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => {
                self.storage.discard_all(FileCategory::Tareas, &archivos).await;
                Err(e)
            }
        }
    }

    /// Eliminar una tarea. Primero se confirma que existe (una tarea
    /// inexistente devuelve 404 sin tocar el disco); luego se borran los
    /// archivos físicos best-effort y por último las filas.
    pub async fn eliminar(&self, id: i32) -> AppResult<usize> {
        if !self.repository.existe(id).await? {
            return Err(AppError::NotFound("Tarea no encontrada".to_string()));
        }

        let archivos = self.repository.archivos_de(id).await?;
        let mut eliminados = 0;
        for archivo in &archivos {
            if self
                .storage
                .delete(FileCategory::Tareas, &archivo.ruta_archivo)
                .await
            {
                eliminados += 1;
            }
        }

        self.repository.eliminar(id).await?;
        Ok(eliminados)
    }

    pub async fn tareas_de_personal(&self, personal_id: i32) -> AppResult<Vec<TareaAsignada>> {
        let filas = self.repository.tareas_de_personal(personal_id).await?;
        let hoy = Utc::now().date_naive();

        let mut tareas = Vec::with_capacity(filas.len());
        for fila in filas {
            let archivos = self.repository.archivos_de(fila.id).await?;
            tareas.push(TareaAsignada {
                id: fila.id,
                titulo: fila.titulo,
                descripcion: fila.descripcion,
                fecha_entrega: fila.fecha_entrega,
                creado_por_id: fila.creado_por_id,
                creado_por_tipo: fila.creado_por_tipo,
                fecha_creacion: fila.fecha_creacion,
                creado_por_nombre: fila.creado_por_nombre,
                asignacion_id: fila.asignacion_id,
                asignacion_estado: fila.asignacion_estado,
                asignacion_comentarios: fila.asignacion_comentarios,
                fecha_completado: fila.fecha_completado,
                archivos: self.con_urls(archivos),
                dias_restantes: dias_restantes(fila.fecha_entrega, hoy),
            });
        }

        Ok(tareas)
    }

    pub async fn conteo_pendientes(&self, personal_id: i32) -> AppResult<i64> {
        self.repository.conteo_pendientes(personal_id).await
    }

    /// Eliminar un archivo adjunto: primero el archivo físico, luego la fila
    pub async fn eliminar_archivo(&self, archivo_id: i32) -> AppResult<()> {
        let archivo = self
            .repository
            .encontrar_archivo(archivo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Archivo no encontrado".to_string()))?;

        self.storage
            .delete(FileCategory::Tareas, &archivo.ruta_archivo)
            .await;

        self.repository.eliminar_archivo(archivo_id).await
    }
}
