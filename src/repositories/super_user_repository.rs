use sqlx::PgPool;

use crate::models::super_user::SuperUserPublico;
use crate::utils::errors::{map_unique_violation, AppResult};

pub struct SuperUserRepository {
    pool: PgPool,
}

impl SuperUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO super_users (username, email, password, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "El usuario o email ya existe"))?;

        Ok(id)
    }

    pub async fn list(&self) -> AppResult<Vec<SuperUserPublico>> {
        let users = sqlx::query_as::<_, SuperUserPublico>(
            "SELECT id, username, email, created_at FROM super_users ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
