use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::actividad::{Actividad, ActividadConDetalle, ActividadImagen};
use crate::models::actor::ActorRef;
use crate::storage::StoredFile;
use crate::utils::errors::{AppError, AppResult};

/// Consulta base de actividades con dirección y nombre del creador.
/// El creador se resuelve con el mismo despacho etiquetado que el resto
/// del sistema: un LEFT JOIN por tabla de actores más un CASE.
const SELECT_ACTIVIDAD: &str = r#"
    SELECT a.id, a.titulo, a.descripcion, a.tipo_actividad, a.fecha_inicio, a.fecha_fin,
           a.direccion_id, a.creado_por_id, a.creado_por_tipo, a.estado, a.fecha_creacion,
           d.nombre as direccion_nombre,
           CASE
             WHEN a.creado_por_tipo = 'directivo' THEN dir.nombre_completo
             WHEN a.creado_por_tipo = 'personal' THEN per.nombre_completo
             ELSE 'Sistema'
           END as creado_por_nombre
    FROM actividades a
    LEFT JOIN direcciones d ON a.direccion_id = d.id
    LEFT JOIN directivos dir ON a.creado_por_id = dir.id AND a.creado_por_tipo = 'directivo'
    LEFT JOIN personal per ON a.creado_por_id = per.id AND a.creado_por_tipo = 'personal'
"#;

pub struct ActividadRepository {
    pool: PgPool,
}

impl ActividadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta la actividad y sus imágenes en una sola transacción
    pub async fn create(
        &self,
        titulo: &str,
        descripcion: Option<&str>,
        tipo_actividad: &str,
        fecha_inicio: NaiveDate,
        fecha_fin: Option<NaiveDate>,
        direccion_id: i32,
        creador: ActorRef,
        imagenes: &[StoredFile],
    ) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let actividad_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO actividades
            (titulo, descripcion, tipo_actividad, fecha_inicio, fecha_fin, direccion_id,
             creado_por_id, creado_por_tipo, estado, fecha_creacion)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pendiente', NOW())
            RETURNING id
            "#,
        )
        .bind(titulo)
        .bind(descripcion)
        .bind(tipo_actividad)
        .bind(fecha_inicio)
        .bind(fecha_fin)
        .bind(direccion_id)
        .bind(creador.id)
        .bind(creador.role.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for imagen in imagenes {
            sqlx::query(
                r#"
                INSERT INTO actividad_imagenes
                (actividad_id, nombre_archivo, ruta_archivo, tipo_mime, tamano, fecha_subida)
                VALUES ($1, $2, $3, $4, $5, NOW())
                "#,
            )
            .bind(actividad_id)
            .bind(&imagen.nombre_original)
            .bind(&imagen.nombre_archivo)
            .bind(&imagen.tipo_mime)
            .bind(imagen.tamano)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(actividad_id)
    }

    pub async fn list_by_direccion(&self, direccion_id: i32) -> AppResult<Vec<ActividadConDetalle>> {
        let sql = format!(
            "{} WHERE a.direccion_id = $1 ORDER BY a.fecha_creacion DESC",
            SELECT_ACTIVIDAD
        );
        let actividades = sqlx::query_as::<_, ActividadConDetalle>(&sql)
            .bind(direccion_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(actividades)
    }

    pub async fn list_all(&self) -> AppResult<Vec<ActividadConDetalle>> {
        let sql = format!("{} ORDER BY a.fecha_creacion DESC", SELECT_ACTIVIDAD);
        let actividades = sqlx::query_as::<_, ActividadConDetalle>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(actividades)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Actividad>> {
        let actividad = sqlx::query_as::<_, Actividad>(
            r#"
            SELECT id, titulo, descripcion, tipo_actividad, fecha_inicio, fecha_fin,
                   direccion_id, creado_por_id, creado_por_tipo, estado, fecha_creacion
            FROM actividades WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(actividad)
    }

    pub async fn imagenes_de(&self, actividad_id: i32) -> AppResult<Vec<ActividadImagen>> {
        let imagenes = sqlx::query_as::<_, ActividadImagen>(
            r#"
            SELECT id, actividad_id, nombre_archivo, ruta_archivo, tipo_mime, tamano, fecha_subida
            FROM actividad_imagenes
            WHERE actividad_id = $1
            "#,
        )
        .bind(actividad_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(imagenes)
    }

    pub async fn update_estado(&self, id: i32, estado: &str) -> AppResult<u64> {
        let result = sqlx::query("UPDATE actividades SET estado = $2 WHERE id = $1")
            .bind(id)
            .bind(estado)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Borra las filas hijas antes que la actividad, en una transacción.
    /// Los archivos físicos ya fueron eliminados por el llamador.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM actividad_imagenes WHERE actividad_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM actividades WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Actividad no encontrada".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }
}
