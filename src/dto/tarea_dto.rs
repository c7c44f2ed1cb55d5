use serde::{Deserialize, Serialize};

use crate::models::actor::ActorRole;
use crate::models::tarea::{AsignacionConUsuario, HistorialConUsuario, TareaArchivo};
use crate::utils::errors::{AppError, AppResult};

/// Una entrada del arreglo `asignaciones` que llega como JSON en el
/// formulario de creación/edición de tareas
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AsignacionEntrada {
    pub usuario_id: i32,
    pub usuario_tipo: String,
}

/// Parsear y validar la codificación de asignaciones.
/// Debe ser un arreglo JSON no vacío y cada rol debe ser asignable
/// (personal o directivo). Cualquier malformación se rechaza ANTES de
/// tocar la base de datos.
pub fn parse_asignaciones(raw: &str) -> AppResult<Vec<AsignacionEntrada>> {
    let asignaciones: Vec<AsignacionEntrada> = serde_json::from_str(raw)
        .map_err(|_| AppError::Validation("Formato de asignaciones inválido".to_string()))?;

    if asignaciones.is_empty() {
        return Err(AppError::Validation(
            "Debe asignar al menos un usuario".to_string(),
        ));
    }

    for asignacion in &asignaciones {
        match ActorRole::parse(&asignacion.usuario_tipo) {
            Some(role) if role.asignable() => {}
            _ => {
                return Err(AppError::Validation(
                    "Formato de asignaciones inválido".to_string(),
                ))
            }
        }
    }

    Ok(asignaciones)
}

/// Archivo adjunto con su URL pública de descarga
#[derive(Debug, Serialize)]
pub struct ArchivoConUrl {
    #[serde(flatten)]
    pub archivo: TareaArchivo,
    pub url: String,
}

/// Tarea con agregados por estado, para el listado de administración
#[derive(Debug, Serialize)]
pub struct TareaResumen {
    pub id: i32,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_entrega: chrono::NaiveDate,
    pub creado_por_id: i32,
    pub creado_por_tipo: String,
    pub fecha_creacion: chrono::DateTime<chrono::Utc>,
    pub creado_por_nombre: Option<String>,
    pub total_asignaciones: i64,
    pub completadas: i64,
    pub pendientes: i64,
    pub en_progreso: i64,
    pub progreso: i32,
    pub asignaciones: Vec<AsignacionConUsuario>,
    pub archivos: Vec<ArchivoConUrl>,
}

/// Tarea individual con asignaciones, archivos e historial
#[derive(Debug, Serialize)]
pub struct TareaDetalle {
    pub id: i32,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_entrega: chrono::NaiveDate,
    pub creado_por_id: i32,
    pub creado_por_tipo: String,
    pub fecha_creacion: chrono::DateTime<chrono::Utc>,
    pub creado_por_nombre: Option<String>,
    pub asignaciones: Vec<AsignacionConUsuario>,
    pub archivos: Vec<ArchivoConUrl>,
    pub historial: Vec<HistorialConUsuario>,
}

/// Tarea vista por su asignado, con el estado de SU asignación y los
/// días restantes hasta la entrega
#[derive(Debug, Serialize)]
pub struct TareaAsignada {
    pub id: i32,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha_entrega: chrono::NaiveDate,
    pub creado_por_id: i32,
    pub creado_por_tipo: String,
    pub fecha_creacion: chrono::DateTime<chrono::Utc>,
    pub creado_por_nombre: Option<String>,
    pub asignacion_id: i32,
    pub asignacion_estado: String,
    pub asignacion_comentarios: Option<String>,
    pub fecha_completado: Option<chrono::DateTime<chrono::Utc>>,
    pub archivos: Vec<ArchivoConUrl>,
    pub dias_restantes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_asignaciones_validas() {
        let raw = r#"[{"usuario_id":7,"usuario_tipo":"personal"},{"usuario_id":9,"usuario_tipo":"directivo"}]"#;
        let asignaciones = parse_asignaciones(raw).unwrap();
        assert_eq!(asignaciones.len(), 2);
        assert_eq!(asignaciones[0].usuario_id, 7);
        assert_eq!(asignaciones[1].usuario_tipo, "directivo");
    }

    #[test]
    fn test_parse_asignaciones_vacias() {
        assert!(parse_asignaciones("[]").is_err());
    }

    #[test]
    fn test_parse_asignaciones_malformadas() {
        assert!(parse_asignaciones("no es json").is_err());
        assert!(parse_asignaciones("{\"usuario_id\":1}").is_err());
    }

    #[test]
    fn test_parse_asignaciones_rechaza_superadmin() {
        // un superadmin no puede recibir asignaciones
        let raw = r#"[{"usuario_id":1,"usuario_tipo":"superadmin"}]"#;
        assert!(parse_asignaciones(raw).is_err());

        let raw = r#"[{"usuario_id":1,"usuario_tipo":"alumno"}]"#;
        assert!(parse_asignaciones(raw).is_err());
    }
}
