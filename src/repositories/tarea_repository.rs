//! Repositorio del flujo de tareas
//!
//! Aquí viven las operaciones multi-tabla del sistema. Cada una abre una
//! `sqlx::Transaction` con scope propio: el commit es explícito y cualquier
//! salida temprana (error o `?`) revierte al soltar la transacción, con lo
//! que la conexión vuelve al pool en todos los caminos.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::dto::tarea_dto::AsignacionEntrada;
use crate::models::actor::ActorRef;
use crate::models::tarea::{
    descripcion_actualizacion, descripcion_completada, descripcion_creada, AccionHistorial,
    AsignacionConUsuario, EstadoAsignacion, HistorialConUsuario, TareaArchivo,
};
use crate::storage::StoredFile;
use crate::utils::errors::{AppError, AppResult};

/// Nombre del creador de una tarea, resuelto por despacho de rol
const CREADOR_NOMBRE: &str = r#"
    CASE
      WHEN t.creado_por_tipo = 'superadmin' THEN su.username
      WHEN t.creado_por_tipo = 'directivo' THEN d.nombre_completo
      WHEN t.creado_por_tipo = 'personal' THEN p.nombre_completo
    END as creado_por_nombre
"#;

const JOIN_CREADOR: &str = r#"
    LEFT JOIN super_users su ON t.creado_por_id = su.id AND t.creado_por_tipo = 'superadmin'
    LEFT JOIN directivos d ON t.creado_por_id = d.id AND t.creado_por_tipo = 'directivo'
    LEFT JOIN personal p ON t.creado_por_id = p.id AND t.creado_por_tipo = 'personal'
"#;

/// Tarea con agregados por estado de asignación
#[derive(Debug, sqlx::FromRow)]
pub struct TareaConAgregados {
    pub id: i32,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_entrega: NaiveDate,
    pub creado_por_id: i32,
    pub creado_por_tipo: String,
    pub fecha_creacion: chrono::DateTime<chrono::Utc>,
    pub creado_por_nombre: Option<String>,
    pub total_asignaciones: i64,
    pub completadas: i64,
    pub pendientes: i64,
    pub en_progreso: i64,
}

/// Tarea con el nombre del creador resuelto
#[derive(Debug, sqlx::FromRow)]
pub struct TareaConCreador {
    pub id: i32,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_entrega: NaiveDate,
    pub creado_por_id: i32,
    pub creado_por_tipo: String,
    pub fecha_creacion: chrono::DateTime<chrono::Utc>,
    pub creado_por_nombre: Option<String>,
}

/// Tarea vista desde la asignación de un personal concreto
#[derive(Debug, sqlx::FromRow)]
pub struct TareaAsignadaRow {
    pub id: i32,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_entrega: NaiveDate,
    pub creado_por_id: i32,
    pub creado_por_tipo: String,
    pub fecha_creacion: chrono::DateTime<chrono::Utc>,
    pub creado_por_nombre: Option<String>,
    pub asignacion_id: i32,
    pub asignacion_estado: String,
    pub asignacion_comentarios: Option<String>,
    pub fecha_completado: Option<chrono::DateTime<chrono::Utc>>,
}

/// Asignación junto con el título de su tarea
#[derive(Debug, sqlx::FromRow)]
pub struct AsignacionConTarea {
    pub id: i32,
    pub tarea_id: i32,
    pub usuario_id: i32,
    pub usuario_tipo: String,
    pub estado: String,
    pub comentarios: Option<String>,
    pub fecha_completado: Option<chrono::DateTime<chrono::Utc>>,
    pub titulo: String,
}

/// Usuario asignable a tareas (solo personal)
#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct UsuarioAsignable {
    pub id: i32,
    pub nombre: String,
    pub tipo: String,
    pub cargo: String,
    pub direccion_nombre: Option<String>,
}

pub struct TareaRepository {
    pool: PgPool,
}

impl TareaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Solo el personal puede recibir asignaciones desde la pantalla de
    /// administración; los directivos llegan por referencia directa.
    pub async fn usuarios_asignables(&self) -> AppResult<Vec<UsuarioAsignable>> {
        let usuarios = sqlx::query_as::<_, UsuarioAsignable>(
            r#"
            SELECT p.id, p.nombre_completo as nombre, 'personal' as tipo,
                   p.puesto as cargo, dir.nombre as direccion_nombre
            FROM personal p
            LEFT JOIN direcciones dir ON p.direccion_id = dir.id
            ORDER BY p.nombre_completo
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(usuarios)
    }

    /// Creación atómica: tarea + N asignaciones + M archivos + historial.
    /// Si cualquier paso falla, nada queda escrito.
    pub async fn crear_tarea(
        &self,
        titulo: &str,
        descripcion: Option<&str>,
        fecha_entrega: NaiveDate,
        creador: ActorRef,
        asignaciones: &[AsignacionEntrada],
        archivos: &[StoredFile],
    ) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let tarea_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO tareas (titulo, descripcion, fecha_entrega, creado_por_id, creado_por_tipo, fecha_creacion)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id
            "#,
        )
        .bind(titulo)
        .bind(descripcion)
        .bind(fecha_entrega)
        .bind(creador.id)
        .bind(creador.role.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for asignacion in asignaciones {
            sqlx::query(
                r#"
                INSERT INTO tareas_asignaciones (tarea_id, usuario_id, usuario_tipo, estado)
                VALUES ($1, $2, $3, 'pendiente')
                "#,
            )
            .bind(tarea_id)
            .bind(asignacion.usuario_id)
            .bind(&asignacion.usuario_tipo)
            .execute(&mut *tx)
            .await?;
        }

        for archivo in archivos {
            sqlx::query(
                r#"
                INSERT INTO tareas_archivos
                (tarea_id, nombre_original, nombre_archivo, ruta_archivo, tipo_mime, tamano, fecha_subida)
                VALUES ($1, $2, $3, $4, $5, $6, NOW())
                "#,
            )
            .bind(tarea_id)
            .bind(&archivo.nombre_original)
            .bind(&archivo.nombre_archivo)
            .bind(&archivo.nombre_archivo)
            .bind(&archivo.tipo_mime)
            .bind(archivo.tamano)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO tareas_historial (tarea_id, usuario_id, usuario_tipo, accion, descripcion, fecha)
            VALUES ($1, $2, $3, $4, $5, NOW())
            "#,
        )
        .bind(tarea_id)
        .bind(creador.id)
        .bind(creador.role.as_str())
        .bind(AccionHistorial::Creada.as_str())
        .bind(descripcion_creada(asignaciones.len()))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(tarea_id)
    }

    pub async fn listar_todas(&self) -> AppResult<Vec<TareaConAgregados>> {
        let sql = format!(
            r#"
            SELECT t.id, t.titulo, t.descripcion, t.fecha_entrega, t.creado_por_id,
                   t.creado_por_tipo, t.fecha_creacion,
                   {creador},
                   COUNT(DISTINCT ta.id) as total_asignaciones,
                   COALESCE(SUM(CASE WHEN ta.estado = 'completada' THEN 1 ELSE 0 END), 0) as completadas,
                   COALESCE(SUM(CASE WHEN ta.estado = 'pendiente' THEN 1 ELSE 0 END), 0) as pendientes,
                   COALESCE(SUM(CASE WHEN ta.estado = 'en_progreso' THEN 1 ELSE 0 END), 0) as en_progreso
            FROM tareas t
            {joins}
            LEFT JOIN tareas_asignaciones ta ON t.id = ta.tarea_id
            GROUP BY t.id, su.username, d.nombre_completo, p.nombre_completo
            ORDER BY t.fecha_entrega ASC, t.fecha_creacion DESC
            "#,
            creador = CREADOR_NOMBRE,
            joins = JOIN_CREADOR,
        );

        let tareas = sqlx::query_as::<_, TareaConAgregados>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(tareas)
    }

    pub async fn obtener(&self, id: i32) -> AppResult<Option<TareaConCreador>> {
        let sql = format!(
            r#"
            SELECT t.id, t.titulo, t.descripcion, t.fecha_entrega, t.creado_por_id,
                   t.creado_por_tipo, t.fecha_creacion,
                   {creador}
            FROM tareas t
            {joins}
            WHERE t.id = $1
            "#,
            creador = CREADOR_NOMBRE,
            joins = JOIN_CREADOR,
        );

        let tarea = sqlx::query_as::<_, TareaConCreador>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tarea)
    }

    pub async fn asignaciones_de(&self, tarea_id: i32) -> AppResult<Vec<AsignacionConUsuario>> {
        let asignaciones = sqlx::query_as::<_, AsignacionConUsuario>(
            r#"
            SELECT ta.id, ta.tarea_id, ta.usuario_id, ta.usuario_tipo, ta.estado,
                   ta.comentarios, ta.fecha_completado,
                   CASE
                     WHEN ta.usuario_tipo = 'directivo' THEN d.nombre_completo
                     WHEN ta.usuario_tipo = 'personal' THEN p.nombre_completo
                   END as usuario_nombre,
                   CASE
                     WHEN ta.usuario_tipo = 'directivo' THEN d.cargo
                     WHEN ta.usuario_tipo = 'personal' THEN p.puesto
                   END as usuario_cargo,
                   dir.nombre as direccion_nombre
            FROM tareas_asignaciones ta
            LEFT JOIN directivos d ON ta.usuario_id = d.id AND ta.usuario_tipo = 'directivo'
            LEFT JOIN personal p ON ta.usuario_id = p.id AND ta.usuario_tipo = 'personal'
            LEFT JOIN direcciones dir ON
                (ta.usuario_tipo = 'directivo' AND d.direccion_id = dir.id) OR
                (ta.usuario_tipo = 'personal' AND p.direccion_id = dir.id)
            WHERE ta.tarea_id = $1
            ORDER BY ta.estado, usuario_nombre
            "#,
        )
        .bind(tarea_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(asignaciones)
    }

    pub async fn archivos_de(&self, tarea_id: i32) -> AppResult<Vec<TareaArchivo>> {
        let archivos = sqlx::query_as::<_, TareaArchivo>(
            r#"
            SELECT id, tarea_id, nombre_original, nombre_archivo, ruta_archivo, tipo_mime, tamano, fecha_subida
            FROM tareas_archivos
            WHERE tarea_id = $1
            "#,
        )
        .bind(tarea_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(archivos)
    }

    pub async fn historial_de(&self, tarea_id: i32) -> AppResult<Vec<HistorialConUsuario>> {
        let historial = sqlx::query_as::<_, HistorialConUsuario>(
            r#"
            SELECT h.id, h.tarea_id, h.usuario_id, h.usuario_tipo, h.accion, h.descripcion, h.fecha,
                   CASE
                     WHEN h.usuario_tipo = 'superadmin' THEN su.username
                     WHEN h.usuario_tipo = 'directivo' THEN d.nombre_completo
                     WHEN h.usuario_tipo = 'personal' THEN p.nombre_completo
                   END as usuario_nombre
            FROM tareas_historial h
            LEFT JOIN super_users su ON h.usuario_id = su.id AND h.usuario_tipo = 'superadmin'
            LEFT JOIN directivos d ON h.usuario_id = d.id AND h.usuario_tipo = 'directivo'
            LEFT JOIN personal p ON h.usuario_id = p.id AND h.usuario_tipo = 'personal'
            WHERE h.tarea_id = $1
            ORDER BY h.fecha DESC
            "#,
        )
        .bind(tarea_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(historial)
    }

    pub async fn encontrar_asignacion(&self, id: i32) -> AppResult<Option<AsignacionConTarea>> {
        let asignacion = sqlx::query_as::<_, AsignacionConTarea>(
            r#"
            SELECT ta.id, ta.tarea_id, ta.usuario_id, ta.usuario_tipo, ta.estado,
                   ta.comentarios, ta.fecha_completado, t.titulo
            FROM tareas_asignaciones ta
            INNER JOIN tareas t ON ta.tarea_id = t.id
            WHERE ta.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(asignacion)
    }

    /// Completar una asignación: estado, comentarios y fecha se sobreescriben
    /// (re-completar es idempotente por diseño del flujo), los archivos se
    /// asocian a la TAREA y se anota el historial. Todo en una transacción.
    pub async fn completar_asignacion(
        &self,
        asignacion: &AsignacionConTarea,
        comentarios: Option<&str>,
        archivos: &[StoredFile],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE tareas_asignaciones
            SET estado = 'completada', comentarios = $2, fecha_completado = NOW()
            WHERE id = $1
            "#,
        )
        .bind(asignacion.id)
        .bind(comentarios)
        .execute(&mut *tx)
        .await?;

        for archivo in archivos {
            sqlx::query(
                r#"
                INSERT INTO tareas_archivos
                (tarea_id, nombre_original, nombre_archivo, ruta_archivo, tipo_mime, tamano, fecha_subida)
                VALUES ($1, $2, $3, $4, $5, $6, NOW())
                "#,
            )
            .bind(asignacion.tarea_id)
            .bind(&archivo.nombre_original)
            .bind(&archivo.nombre_archivo)
            .bind(&archivo.nombre_archivo)
            .bind(&archivo.tipo_mime)
            .bind(archivo.tamano)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO tareas_historial (tarea_id, usuario_id, usuario_tipo, accion, descripcion, fecha)
            VALUES ($1, $2, $3, $4, $5, NOW())
            "#,
        )
        .bind(asignacion.tarea_id)
        .bind(asignacion.usuario_id)
        .bind(&asignacion.usuario_tipo)
        .bind(AccionHistorial::Completada.as_str())
        .bind(descripcion_completada(
            comentarios.is_some(),
            archivos.len(),
        ))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Actualización administrativa del estado de una asignación.
    /// `fecha_completado` solo se fija cuando el estado destino es
    /// `completada`; cualquier otro destino la anula.
    pub async fn actualizar_asignacion(
        &self,
        asignacion_id: i32,
        estado: EstadoAsignacion,
        comentarios: Option<&str>,
        actor: ActorRef,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let tarea_id: Option<i32> =
            sqlx::query_scalar("SELECT tarea_id FROM tareas_asignaciones WHERE id = $1")
                .bind(asignacion_id)
                .fetch_optional(&mut *tx)
                .await?;

        let tarea_id = tarea_id
            .ok_or_else(|| AppError::NotFound("Asignación no encontrada".to_string()))?;

        if estado == EstadoAsignacion::Completada {
            sqlx::query(
                r#"
                UPDATE tareas_asignaciones
                SET estado = $2, comentarios = $3, fecha_completado = NOW()
                WHERE id = $1
                "#,
            )
            .bind(asignacion_id)
            .bind(estado.as_str())
            .bind(comentarios)
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query(
                r#"
                UPDATE tareas_asignaciones
                SET estado = $2, comentarios = $3, fecha_completado = NULL
                WHERE id = $1
                "#,
            )
            .bind(asignacion_id)
            .bind(estado.as_str())
            .bind(comentarios)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO tareas_historial (tarea_id, usuario_id, usuario_tipo, accion, descripcion, fecha)
            VALUES ($1, $2, $3, $4, $5, NOW())
            "#,
        )
        .bind(tarea_id)
        .bind(actor.id)
        .bind(actor.role.as_str())
        .bind(AccionHistorial::Actualizacion.as_str())
        .bind(descripcion_actualizacion(estado))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Edición de una tarea. Si llegan asignaciones nuevas REEMPLAZAN el
    /// conjunto completo: las filas existentes se borran y las nuevas entran
    /// en `pendiente`, descartando el avance registrado en las filas (el
    /// historial queda como único registro). Los archivos nuevos se agregan
    /// sin tocar los existentes.
    pub async fn editar_tarea(
        &self,
        id: i32,
        titulo: &str,
        descripcion: Option<&str>,
        fecha_entrega: NaiveDate,
        nuevas_asignaciones: Option<&[AsignacionEntrada]>,
        archivos: &[StoredFile],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE tareas
            SET titulo = $2, descripcion = $3, fecha_entrega = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(titulo)
        .bind(descripcion)
        .bind(fecha_entrega)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tarea no encontrada".to_string()));
        }

        if let Some(asignaciones) = nuevas_asignaciones {
            sqlx::query("DELETE FROM tareas_asignaciones WHERE tarea_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for asignacion in asignaciones {
                sqlx::query(
                    r#"
                    INSERT INTO tareas_asignaciones (tarea_id, usuario_id, usuario_tipo, estado)
                    VALUES ($1, $2, $3, 'pendiente')
                    "#,
                )
                .bind(id)
                .bind(asignacion.usuario_id)
                .bind(&asignacion.usuario_tipo)
                .execute(&mut *tx)
                .await?;
            }
        }

        for archivo in archivos {
            sqlx::query(
                r#"
                INSERT INTO tareas_archivos
                (tarea_id, nombre_original, nombre_archivo, ruta_archivo, tipo_mime, tamano, fecha_subida)
                VALUES ($1, $2, $3, $4, $5, $6, NOW())
                "#,
            )
            .bind(id)
            .bind(&archivo.nombre_original)
            .bind(&archivo.nombre_archivo)
            .bind(&archivo.nombre_archivo)
            .bind(&archivo.tipo_mime)
            .bind(archivo.tamano)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn existe(&self, id: i32) -> AppResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tareas WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Borrado de la fila de tarea; asignaciones, archivos e historial caen
    /// por CASCADE. Los archivos físicos los elimina el llamador ANTES,
    /// una vez confirmada la existencia de la tarea.
    pub async fn eliminar(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM tareas WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tarea no encontrada".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Tareas asignadas a un personal. Las abiertas (pendiente/en progreso)
    /// ordenan antes que las completadas; dentro de cada grupo por fecha de
    /// entrega ascendente.
    pub async fn tareas_de_personal(&self, personal_id: i32) -> AppResult<Vec<TareaAsignadaRow>> {
        let sql = format!(
            r#"
            SELECT t.id, t.titulo, t.descripcion, t.fecha_entrega, t.creado_por_id,
                   t.creado_por_tipo, t.fecha_creacion,
                   {creador},
                   ta.id as asignacion_id,
                   ta.estado as asignacion_estado,
                   ta.comentarios as asignacion_comentarios,
                   ta.fecha_completado
            FROM tareas t
            INNER JOIN tareas_asignaciones ta ON t.id = ta.tarea_id
            {joins}
            WHERE ta.usuario_id = $1 AND ta.usuario_tipo = 'personal'
            ORDER BY
              CASE WHEN ta.estado IN ('pendiente', 'en_progreso') THEN 1 ELSE 2 END,
              t.fecha_entrega ASC
            "#,
            creador = CREADOR_NOMBRE,
            joins = JOIN_CREADOR,
        );

        let tareas = sqlx::query_as::<_, TareaAsignadaRow>(&sql)
            .bind(personal_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(tareas)
    }

    pub async fn conteo_pendientes(&self, personal_id: i32) -> AppResult<i64> {
        let pendientes: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM tareas_asignaciones ta
            WHERE ta.usuario_id = $1
              AND ta.usuario_tipo = 'personal'
              AND ta.estado IN ('pendiente', 'en_progreso')
            "#,
        )
        .bind(personal_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(pendientes)
    }

    pub async fn encontrar_archivo(&self, archivo_id: i32) -> AppResult<Option<TareaArchivo>> {
        let archivo = sqlx::query_as::<_, TareaArchivo>(
            r#"
            SELECT id, tarea_id, nombre_original, nombre_archivo, ruta_archivo, tipo_mime, tamano, fecha_subida
            FROM tareas_archivos
            WHERE id = $1
            "#,
        )
        .bind(archivo_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(archivo)
    }

    pub async fn eliminar_archivo(&self, archivo_id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM tareas_archivos WHERE id = $1")
            .bind(archivo_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
