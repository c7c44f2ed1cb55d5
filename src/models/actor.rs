//! Referencias de actor etiquetadas por rol
//!
//! Los actores viven en tres tablas disjuntas (`super_users`, `directivos`,
//! `personal`). Una referencia "creado por" o "asignado a" es el par
//! `(id, rol)`: no es una clave foránea, la aplicación es quien resuelve
//! a qué tabla apunta.

use serde::{Deserialize, Serialize};

/// Rol de un actor, determina en qué tabla vive su fila
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    SuperAdmin,
    Directivo,
    Personal,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::SuperAdmin => "superadmin",
            ActorRole::Directivo => "directivo",
            ActorRole::Personal => "personal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "superadmin" => Some(ActorRole::SuperAdmin),
            "directivo" => Some(ActorRole::Directivo),
            "personal" => Some(ActorRole::Personal),
            _ => None,
        }
    }

    /// Roles que pueden recibir asignaciones de tareas
    pub fn asignable(&self) -> bool {
        matches!(self, ActorRole::Directivo | ActorRole::Personal)
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Referencia etiquetada a un actor: `(id, rol)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRef {
    pub id: i32,
    pub role: ActorRole,
}

impl ActorRef {
    pub fn new(id: i32, role: ActorRole) -> Self {
        Self { id, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [ActorRole::SuperAdmin, ActorRole::Directivo, ActorRole::Personal] {
            assert_eq!(ActorRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(ActorRole::parse("alumno"), None);
        assert_eq!(ActorRole::parse(""), None);
    }

    #[test]
    fn test_role_serde_tags() {
        assert_eq!(
            serde_json::to_string(&ActorRole::SuperAdmin).unwrap(),
            "\"superadmin\""
        );
        assert_eq!(
            serde_json::to_string(&ActorRole::Directivo).unwrap(),
            "\"directivo\""
        );
        let parsed: ActorRole = serde_json::from_str("\"personal\"").unwrap();
        assert_eq!(parsed, ActorRole::Personal);
    }

    #[test]
    fn test_asignable() {
        assert!(!ActorRole::SuperAdmin.asignable());
        assert!(ActorRole::Directivo.asignable());
        assert!(ActorRole::Personal.asignable());
    }
}
