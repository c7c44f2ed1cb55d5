use sqlx::PgPool;

use crate::models::directivo::{Directivo, DirectivoConDireccion};
use crate::utils::errors::{map_unique_violation, AppError, AppResult};

const EMAIL_DUPLICADO: &str = "El email ya está registrado";

pub struct DirectivoRepository {
    pool: PgPool,
}

impl DirectivoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<DirectivoConDireccion>> {
        let directivos = sqlx::query_as::<_, DirectivoConDireccion>(
            r#"
            SELECT d.id, d.nombre_completo, d.cargo, d.direccion_id, d.email,
                   dir.nombre as direccion_nombre
            FROM directivos d
            LEFT JOIN direcciones dir ON d.direccion_id = dir.id
            ORDER BY d.nombre_completo
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(directivos)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Directivo>> {
        let directivo = sqlx::query_as::<_, Directivo>(
            "SELECT id, nombre_completo, cargo, direccion_id, email, password FROM directivos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(directivo)
    }

    pub async fn create(
        &self,
        nombre_completo: &str,
        cargo: &str,
        direccion_id: i32,
        email: &str,
        password_hash: &str,
    ) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO directivos (nombre_completo, cargo, direccion_id, email, password)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(nombre_completo)
        .bind(cargo)
        .bind(direccion_id)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, EMAIL_DUPLICADO))?;

        Ok(id)
    }

    /// Actualiza un directivo; re-escribe el hash solo cuando se envió
    /// una contraseña nueva.
    pub async fn update(
        &self,
        id: i32,
        nombre_completo: &str,
        cargo: &str,
        direccion_id: i32,
        email: &str,
        password_hash: Option<&str>,
    ) -> AppResult<()> {
        let result = match password_hash {
            Some(hash) => {
                sqlx::query(
                    r#"
                    UPDATE directivos
                    SET nombre_completo = $2, cargo = $3, direccion_id = $4, email = $5, password = $6
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(nombre_completo)
                .bind(cargo)
                .bind(direccion_id)
                .bind(email)
                .bind(hash)
                .execute(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    UPDATE directivos
                    SET nombre_completo = $2, cargo = $3, direccion_id = $4, email = $5
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(nombre_completo)
                .bind(cargo)
                .bind(direccion_id)
                .bind(email)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(|e| map_unique_violation(e, EMAIL_DUPLICADO))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Directivo no encontrado".to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM directivos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Directivo no encontrado".to_string()));
        }

        Ok(())
    }
}
