use serde::{Deserialize, Serialize};

use crate::models::actor::ActorRole;

// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Usuario autenticado, con los campos propios de su rol.
// `nombre` y `username` llevan el mismo valor por compatibilidad con los
// clientes que esperan uno u otro.
#[derive(Debug, Serialize)]
pub struct UsuarioLogin {
    pub id: i32,
    pub nombre: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub puesto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion_nombre: Option<String>,
    pub tipo: ActorRole,
    #[serde(rename = "userType")]
    pub user_type: ActorRole,
}

impl UsuarioLogin {
    pub fn superadmin(id: i32, username: String, email: String) -> Self {
        Self {
            id,
            nombre: username.clone(),
            username,
            email,
            cargo: None,
            puesto: None,
            direccion_id: None,
            direccion_nombre: None,
            tipo: ActorRole::SuperAdmin,
            user_type: ActorRole::SuperAdmin,
        }
    }

    pub fn directivo(
        id: i32,
        nombre_completo: String,
        email: String,
        cargo: String,
        direccion_id: i32,
        direccion_nombre: Option<String>,
    ) -> Self {
        Self {
            id,
            nombre: nombre_completo.clone(),
            username: nombre_completo,
            email,
            cargo: Some(cargo),
            puesto: None,
            direccion_id: Some(direccion_id),
            direccion_nombre,
            tipo: ActorRole::Directivo,
            user_type: ActorRole::Directivo,
        }
    }

    pub fn personal(
        id: i32,
        nombre_completo: String,
        email: String,
        puesto: String,
        direccion_id: i32,
        direccion_nombre: Option<String>,
    ) -> Self {
        Self {
            id,
            nombre: nombre_completo.clone(),
            username: nombre_completo,
            email,
            cargo: None,
            puesto: Some(puesto),
            direccion_id: Some(direccion_id),
            direccion_nombre,
            tipo: ActorRole::Personal,
            user_type: ActorRole::Personal,
        }
    }
}

// Respuesta del login general: incluye el rol también al nivel superior
#[derive(Debug, Serialize)]
pub struct LoginGeneralResponse {
    pub success: bool,
    pub message: String,
    pub user: UsuarioLogin,
    #[serde(rename = "userType")]
    pub user_type: ActorRole,
}

impl LoginGeneralResponse {
    pub fn new(user: UsuarioLogin) -> Self {
        let user_type = user.user_type;
        Self {
            success: true,
            message: "Login exitoso".to_string(),
            user,
            user_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superadmin_omits_role_specific_fields() {
        let user = UsuarioLogin::superadmin(1, "admin".to_string(), "a@u.edu".to_string());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["tipo"], "superadmin");
        assert_eq!(json["userType"], "superadmin");
        assert!(json.get("cargo").is_none());
        assert!(json.get("puesto").is_none());
    }

    #[test]
    fn test_personal_carries_puesto_y_direccion() {
        let user = UsuarioLogin::personal(
            7,
            "Ana Pérez".to_string(),
            "ana@u.edu".to_string(),
            "Analista".to_string(),
            2,
            Some("Sistemas".to_string()),
        );
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["puesto"], "Analista");
        assert_eq!(json["direccion_id"], 2);
        assert_eq!(json["direccion_nombre"], "Sistemas");
        assert_eq!(json["nombre"], json["username"]);
    }
}
