//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod actor;
pub mod actividad;
pub mod comunicado;
pub mod direccion;
pub mod directivo;
pub mod personal;
pub mod super_user;
pub mod tarea;
