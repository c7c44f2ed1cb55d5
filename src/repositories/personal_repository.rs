use sqlx::PgPool;

use crate::models::personal::{Personal, PersonalConDireccion};
use crate::utils::errors::{map_unique_violation, AppError, AppResult};

const EMAIL_DUPLICADO: &str = "El email ya está registrado";

pub struct PersonalRepository {
    pool: PgPool,
}

impl PersonalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<PersonalConDireccion>> {
        let personal = sqlx::query_as::<_, PersonalConDireccion>(
            r#"
            SELECT p.id, p.nombre_completo, p.puesto, p.direccion_id, p.email, p.foto_perfil,
                   dir.nombre as direccion_nombre
            FROM personal p
            LEFT JOIN direcciones dir ON p.direccion_id = dir.id
            ORDER BY p.nombre_completo
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(personal)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<PersonalConDireccion>> {
        let personal = sqlx::query_as::<_, PersonalConDireccion>(
            r#"
            SELECT p.id, p.nombre_completo, p.puesto, p.direccion_id, p.email, p.foto_perfil,
                   dir.nombre as direccion_nombre
            FROM personal p
            LEFT JOIN direcciones dir ON p.direccion_id = dir.id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(personal)
    }

    /// Fila completa, con hash de contraseña y foto, para edición y borrado
    pub async fn find_raw(&self, id: i32) -> AppResult<Option<Personal>> {
        let personal = sqlx::query_as::<_, Personal>(
            "SELECT id, nombre_completo, puesto, direccion_id, email, password, foto_perfil FROM personal WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(personal)
    }

    pub async fn create(
        &self,
        nombre_completo: &str,
        puesto: &str,
        direccion_id: i32,
        email: &str,
        password_hash: &str,
        foto_perfil: Option<&str>,
    ) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO personal (nombre_completo, puesto, direccion_id, email, password, foto_perfil)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(nombre_completo)
        .bind(puesto)
        .bind(direccion_id)
        .bind(email)
        .bind(password_hash)
        .bind(foto_perfil)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, EMAIL_DUPLICADO))?;

        Ok(id)
    }

    pub async fn update(
        &self,
        id: i32,
        nombre_completo: &str,
        puesto: &str,
        direccion_id: i32,
        email: &str,
        password_hash: Option<&str>,
        foto_perfil: Option<&str>,
    ) -> AppResult<()> {
        let result = match password_hash {
            Some(hash) => {
                sqlx::query(
                    r#"
                    UPDATE personal
                    SET nombre_completo = $2, puesto = $3, direccion_id = $4, email = $5,
                        password = $6, foto_perfil = $7
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(nombre_completo)
                .bind(puesto)
                .bind(direccion_id)
                .bind(email)
                .bind(hash)
                .bind(foto_perfil)
                .execute(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    UPDATE personal
                    SET nombre_completo = $2, puesto = $3, direccion_id = $4, email = $5,
                        foto_perfil = $6
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(nombre_completo)
                .bind(puesto)
                .bind(direccion_id)
                .bind(email)
                .bind(foto_perfil)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(|e| map_unique_violation(e, EMAIL_DUPLICADO))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Personal no encontrado".to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM personal WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Personal no encontrado".to_string()));
        }

        Ok(())
    }
}
