//! Modelos del flujo de tareas
//!
//! Una tarea posee asignaciones (una por asignado, con su propia máquina de
//! estados), archivos adjuntos (asociados a la tarea, no a una asignación)
//! y un historial append-only.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estado de una asignación: `pendiente → en_progreso → completada`.
/// `en_progreso` es opcional y `completada` es terminal en el flujo normal;
/// una actualización administrativa puede forzar cualquier estado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoAsignacion {
    Pendiente,
    EnProgreso,
    Completada,
}

impl EstadoAsignacion {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoAsignacion::Pendiente => "pendiente",
            EstadoAsignacion::EnProgreso => "en_progreso",
            EstadoAsignacion::Completada => "completada",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pendiente" => Some(EstadoAsignacion::Pendiente),
            "en_progreso" => Some(EstadoAsignacion::EnProgreso),
            "completada" => Some(EstadoAsignacion::Completada),
            _ => None,
        }
    }

    /// Una asignación abierta (pendiente o en progreso) ordena antes que
    /// las completadas en los listados del asignado.
    pub fn abierta(&self) -> bool {
        matches!(self, EstadoAsignacion::Pendiente | EstadoAsignacion::EnProgreso)
    }
}

/// Acción registrada en el historial de una tarea
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccionHistorial {
    Creada,
    Actualizacion,
    Completada,
}

impl AccionHistorial {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccionHistorial::Creada => "creada",
            AccionHistorial::Actualizacion => "actualizacion",
            AccionHistorial::Completada => "completada",
        }
    }
}

/// Asignación con los datos del asignado resueltos por despacho de rol
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AsignacionConUsuario {
    pub id: i32,
    pub tarea_id: i32,
    pub usuario_id: i32,
    pub usuario_tipo: String,
    pub estado: String,
    pub comentarios: Option<String>,
    pub fecha_completado: Option<DateTime<Utc>>,
    pub usuario_nombre: Option<String>,
    pub usuario_cargo: Option<String>,
    pub direccion_nombre: Option<String>,
}

/// Mapea a la tabla `tareas_archivos`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TareaArchivo {
    pub id: i32,
    pub tarea_id: i32,
    pub nombre_original: String,
    pub nombre_archivo: String,
    pub ruta_archivo: String,
    pub tipo_mime: String,
    pub tamano: i64,
    pub fecha_subida: DateTime<Utc>,
}

/// Historial de una tarea (append-only) con el nombre del actor resuelto
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HistorialConUsuario {
    pub id: i32,
    pub tarea_id: i32,
    pub usuario_id: i32,
    pub usuario_tipo: String,
    pub accion: String,
    pub descripcion: String,
    pub fecha: DateTime<Utc>,
    pub usuario_nombre: Option<String>,
}

/// Progreso agregado de una tarea: porcentaje redondeado de asignaciones
/// completadas, 0 cuando no hay ninguna.
pub fn calcular_progreso(completadas: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    ((completadas as f64 / total as f64) * 100.0).round() as i32
}

/// Días restantes hasta la entrega, contados de medianoche a medianoche.
/// Negativo cuando la fecha ya pasó.
pub fn dias_restantes(fecha_entrega: NaiveDate, hoy: NaiveDate) -> i64 {
    (fecha_entrega - hoy).num_days()
}

/// Descripción de historial para la creación de una tarea
pub fn descripcion_creada(asignaciones: usize) -> String {
    format!("Tarea creada con {} asignaciones", asignaciones)
}

/// Descripción de historial para una actualización administrativa de estado
pub fn descripcion_actualizacion(estado: EstadoAsignacion) -> String {
    format!("Estado de asignación actualizado a: {}", estado.as_str())
}

/// Descripción de historial para la completación de una asignación,
/// anotando si hubo comentarios y/o archivos
pub fn descripcion_completada(con_comentarios: bool, archivos: usize) -> String {
    let mut descripcion = String::from("Tarea completada");
    if con_comentarios {
        descripcion.push_str(" con comentarios");
    }
    if archivos > 0 {
        descripcion.push_str(&format!(" y {} archivo(s)", archivos));
    }
    descripcion
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estado_roundtrip() {
        for estado in [
            EstadoAsignacion::Pendiente,
            EstadoAsignacion::EnProgreso,
            EstadoAsignacion::Completada,
        ] {
            assert_eq!(EstadoAsignacion::parse(estado.as_str()), Some(estado));
        }
        assert_eq!(EstadoAsignacion::parse("cancelada"), None);
    }

    #[test]
    fn test_estado_abierta() {
        assert!(EstadoAsignacion::Pendiente.abierta());
        assert!(EstadoAsignacion::EnProgreso.abierta());
        assert!(!EstadoAsignacion::Completada.abierta());
    }

    #[test]
    fn test_calcular_progreso() {
        assert_eq!(calcular_progreso(0, 0), 0);
        assert_eq!(calcular_progreso(0, 4), 0);
        assert_eq!(calcular_progreso(1, 4), 25);
        assert_eq!(calcular_progreso(1, 3), 33);
        assert_eq!(calcular_progreso(2, 3), 67);
        assert_eq!(calcular_progreso(3, 3), 100);
    }

    #[test]
    fn test_dias_restantes() {
        let hoy = NaiveDate::from_ymd_opt(2025, 2, 20).unwrap();
        let entrega = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(dias_restantes(entrega, hoy), 9);
        assert_eq!(dias_restantes(hoy, hoy), 0);

        let vencida = NaiveDate::from_ymd_opt(2025, 2, 18).unwrap();
        assert_eq!(dias_restantes(vencida, hoy), -2);
    }

    #[test]
    fn test_descripciones_historial() {
        assert_eq!(descripcion_creada(3), "Tarea creada con 3 asignaciones");
        assert_eq!(
            descripcion_actualizacion(EstadoAsignacion::EnProgreso),
            "Estado de asignación actualizado a: en_progreso"
        );
        assert_eq!(descripcion_completada(false, 0), "Tarea completada");
        assert_eq!(
            descripcion_completada(true, 0),
            "Tarea completada con comentarios"
        );
        assert_eq!(
            descripcion_completada(true, 2),
            "Tarea completada con comentarios y 2 archivo(s)"
        );
        assert_eq!(
            descripcion_completada(false, 1),
            "Tarea completada y 1 archivo(s)"
        );
    }
}
