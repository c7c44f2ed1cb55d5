//! Controladores de la aplicación
//!
//! Cada controlador valida la entrada, orquesta repositorio + blob store y
//! arma la respuesta. Las rutas los instancian por request con el estado
//! compartido.

pub mod actividad_controller;
pub mod auth_controller;
pub mod comunicado_controller;
pub mod directivo_controller;
pub mod personal_controller;
pub mod super_user_controller;
pub mod tarea_controller;
