//! Rutas de la API
//!
//! Un módulo por entidad; `create_university_router` arma el router
//! completo que `main` monta bajo `/api/university`.

pub mod actividad_routes;
pub mod auth_routes;
pub mod comunicado_routes;
pub mod direccion_routes;
pub mod directivo_routes;
pub mod logo_routes;
pub mod personal_routes;
pub mod super_user_routes;
pub mod system_routes;
pub mod tarea_routes;

use axum::Router;

use crate::state::AppState;

/// Router completo del backend universitario
pub fn create_university_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes::create_auth_router())
        .merge(super_user_routes::create_super_user_router())
        .merge(system_routes::create_system_router())
        .merge(direccion_routes::create_direccion_router())
        .merge(directivo_routes::create_directivo_router())
        .merge(personal_routes::create_personal_router())
        .merge(actividad_routes::create_actividad_router())
        .merge(comunicado_routes::create_comunicado_router())
        .merge(logo_routes::create_logo_router())
        .merge(tarea_routes::create_tarea_router())
}
