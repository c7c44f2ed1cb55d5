//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS de la aplicación.

pub mod cors;
