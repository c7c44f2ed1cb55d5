use sqlx::PgPool;

use crate::models::comunicado::ComunicadoConPublicador;
use crate::utils::errors::{AppError, AppResult};

const SELECT_COMUNICADO: &str = r#"
    SELECT c.id, c.titulo, c.contenido, c.link_externo, c.publicado_por_id, c.estado,
           c.fecha_publicacion,
           su.username as publicado_por_nombre
    FROM comunicados c
    LEFT JOIN super_users su ON c.publicado_por_id = su.id
"#;

pub struct ComunicadoRepository {
    pool: PgPool,
}

impl ComunicadoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        titulo: &str,
        contenido: &str,
        link_externo: Option<&str>,
        publicado_por_id: i32,
    ) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO comunicados (titulo, contenido, link_externo, publicado_por_id, estado, fecha_publicacion)
            VALUES ($1, $2, $3, $4, 'publicado', NOW())
            RETURNING id
            "#,
        )
        .bind(titulo)
        .bind(contenido)
        .bind(link_externo)
        .bind(publicado_por_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn list_publicados(&self) -> AppResult<Vec<ComunicadoConPublicador>> {
        let sql = format!(
            "{} WHERE c.estado = 'publicado' ORDER BY c.fecha_publicacion DESC",
            SELECT_COMUNICADO
        );
        let comunicados = sqlx::query_as::<_, ComunicadoConPublicador>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(comunicados)
    }

    /// Para administración: todos los estados
    pub async fn list_todos(&self) -> AppResult<Vec<ComunicadoConPublicador>> {
        let sql = format!("{} ORDER BY c.fecha_publicacion DESC", SELECT_COMUNICADO);
        let comunicados = sqlx::query_as::<_, ComunicadoConPublicador>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(comunicados)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<ComunicadoConPublicador>> {
        let sql = format!("{} WHERE c.id = $1", SELECT_COMUNICADO);
        let comunicado = sqlx::query_as::<_, ComunicadoConPublicador>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(comunicado)
    }

    pub async fn recientes(&self, limit: i64) -> AppResult<Vec<ComunicadoConPublicador>> {
        let sql = format!(
            "{} WHERE c.estado = 'publicado' ORDER BY c.fecha_publicacion DESC LIMIT $1",
            SELECT_COMUNICADO
        );
        let comunicados = sqlx::query_as::<_, ComunicadoConPublicador>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(comunicados)
    }

    pub async fn update(
        &self,
        id: i32,
        titulo: &str,
        contenido: &str,
        link_externo: Option<&str>,
        estado: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE comunicados
            SET titulo = $2, contenido = $3, link_externo = $4, estado = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(titulo)
        .bind(contenido)
        .bind(link_externo)
        .bind(estado)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Comunicado no encontrado".to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM comunicados WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Comunicado no encontrado".to_string()));
        }

        Ok(())
    }

    pub async fn contar_publicados(&self) -> AppResult<i64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM comunicados WHERE estado = 'publicado'")
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }
}
