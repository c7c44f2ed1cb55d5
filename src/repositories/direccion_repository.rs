use sqlx::PgPool;

use crate::models::direccion::Direccion;
use crate::utils::errors::{map_unique_violation, AppResult};

pub struct DireccionRepository {
    pool: PgPool,
}

impl DireccionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Direccion>> {
        let direcciones =
            sqlx::query_as::<_, Direccion>("SELECT id, nombre FROM direcciones ORDER BY nombre")
                .fetch_all(&self.pool)
                .await?;

        Ok(direcciones)
    }

    pub async fn create(&self, nombre: &str) -> AppResult<i32> {
        let id: i32 =
            sqlx::query_scalar("INSERT INTO direcciones (nombre) VALUES ($1) RETURNING id")
                .bind(nombre)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_unique_violation(e, "Esta dirección ya existe"))?;

        Ok(id)
    }
}
