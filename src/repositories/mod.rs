//! Repositorios de acceso a datos
//!
//! Todo el SQL del sistema vive aquí, un repositorio por agregado.

pub mod actividad_repository;
pub mod actor_repository;
pub mod comunicado_repository;
pub mod direccion_repository;
pub mod directivo_repository;
pub mod personal_repository;
pub mod super_user_repository;
pub mod tarea_repository;
