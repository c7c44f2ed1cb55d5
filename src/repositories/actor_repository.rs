//! Acceso a las tres tablas de actores
//!
//! Los actores viven en tablas disjuntas. Este repositorio concentra las
//! sondas por email para el login y el despacho por rol para resolver
//! nombre o existencia a partir de una referencia `(id, rol)`: cada uso
//! pasa por aquí en lugar de repetir el CASE en cada consulta ad hoc.

use sqlx::PgPool;

use crate::models::actor::{ActorRef, ActorRole};
use crate::models::super_user::SuperUser;
use crate::utils::errors::AppResult;

/// Fila de directivo para el login, con su dirección resuelta
#[derive(Debug, sqlx::FromRow)]
pub struct DirectivoLogin {
    pub id: i32,
    pub nombre_completo: String,
    pub cargo: String,
    pub direccion_id: i32,
    pub email: String,
    pub password: String,
    pub direccion_nombre: Option<String>,
}

/// Fila de personal para el login, con su dirección resuelta
#[derive(Debug, sqlx::FromRow)]
pub struct PersonalLogin {
    pub id: i32,
    pub nombre_completo: String,
    pub puesto: String,
    pub direccion_id: i32,
    pub email: String,
    pub password: String,
    pub direccion_nombre: Option<String>,
}

pub struct ActorRepository {
    pool: PgPool,
}

impl ActorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_super_user_by_email(&self, email: &str) -> AppResult<Option<SuperUser>> {
        let user = sqlx::query_as::<_, SuperUser>(
            "SELECT id, username, email, password, created_at FROM super_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_directivo_by_email(&self, email: &str) -> AppResult<Option<DirectivoLogin>> {
        let directivo = sqlx::query_as::<_, DirectivoLogin>(
            r#"
            SELECT d.id, d.nombre_completo, d.cargo, d.direccion_id, d.email, d.password,
                   dir.nombre as direccion_nombre
            FROM directivos d
            LEFT JOIN direcciones dir ON d.direccion_id = dir.id
            WHERE d.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(directivo)
    }

    pub async fn find_personal_by_email(&self, email: &str) -> AppResult<Option<PersonalLogin>> {
        let personal = sqlx::query_as::<_, PersonalLogin>(
            r#"
            SELECT p.id, p.nombre_completo, p.puesto, p.direccion_id, p.email, p.password,
                   dir.nombre as direccion_nombre
            FROM personal p
            LEFT JOIN direcciones dir ON p.direccion_id = dir.id
            WHERE p.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(personal)
    }

    /// Existencia de la fila apuntada por una referencia etiquetada.
    /// El nombre de tabla sale del enum, nunca de entrada del cliente.
    pub async fn exists(&self, actor: ActorRef) -> AppResult<bool> {
        let table = match actor.role {
            ActorRole::SuperAdmin => "super_users",
            ActorRole::Directivo => "directivos",
            ActorRole::Personal => "personal",
        };

        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table);
        let (exists,): (bool,) = sqlx::query_as(&sql).bind(actor.id).fetch_one(&self.pool).await?;

        Ok(exists)
    }

    /// Nombre visible del actor apuntado por una referencia etiquetada
    pub async fn display_name(&self, actor: ActorRef) -> AppResult<Option<String>> {
        let (table, column) = match actor.role {
            ActorRole::SuperAdmin => ("super_users", "username"),
            ActorRole::Directivo => ("directivos", "nombre_completo"),
            ActorRole::Personal => ("personal", "nombre_completo"),
        };

        let sql = format!("SELECT {} FROM {} WHERE id = $1", column, table);
        let name: Option<String> = sqlx::query_scalar(&sql)
            .bind(actor.id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(name)
    }
}
