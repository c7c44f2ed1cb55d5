//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de entrada antes de tocar la base de datos.

use chrono::NaiveDate;
use validator::ValidationError;

use crate::utils::errors::AppError;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !value.contains('@') || !value.contains('.') {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Campo requerido de un formulario multipart: devuelve el valor o un
/// error de validación con el mensaje dado.
pub fn required_field<'a>(
    value: Option<&'a String>,
    message: &str,
) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.as_str()),
        _ => Err(AppError::Validation(message.to_string())),
    }
}

/// Parsear un id numérico recibido como texto de formulario
pub fn parse_id_field(value: &str, message: &str) -> Result<i32, AppError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::Validation(message.to_string()))
}

/// Parsear una fecha `YYYY-MM-DD` recibida como texto de formulario
pub fn parse_date_field(value: &str, message: &str) -> Result<NaiveDate, AppError> {
    validate_date(value.trim()).map_err(|_| AppError::Validation(message.to_string()))
}

/// Clamp del parámetro `limit` de query string: [1, 100], default 5
pub fn clamp_limit(raw: Option<&str>) -> i64 {
    const DEFAULT: i64 = 5;
    const MAX: i64 = 100;

    match raw {
        Some(s) if !s.trim().is_empty() => match s.trim().parse::<i64>() {
            Ok(n) if n > 0 => n.min(MAX),
            _ => DEFAULT,
        },
        _ => DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("hola").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("test@").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("2024/01/15").is_err());
        assert!(validate_date("15-01-2024").is_err());
    }

    #[test]
    fn test_required_field() {
        let value = Some("dato".to_string());
        assert_eq!(required_field(value.as_ref(), "falta").unwrap(), "dato");

        let empty = Some("  ".to_string());
        assert!(required_field(empty.as_ref(), "falta").is_err());
        assert!(required_field(None, "falta").is_err());
    }

    #[test]
    fn test_parse_id_field() {
        assert_eq!(parse_id_field("7", "id inválido").unwrap(), 7);
        assert!(parse_id_field("abc", "id inválido").is_err());
    }

    #[test]
    fn test_clamp_limit_default() {
        assert_eq!(clamp_limit(None), 5);
        assert_eq!(clamp_limit(Some("")), 5);
        assert_eq!(clamp_limit(Some("abc")), 5);
        assert_eq!(clamp_limit(Some("0")), 5);
        assert_eq!(clamp_limit(Some("-3")), 5);
    }

    #[test]
    fn test_clamp_limit_bounds() {
        assert_eq!(clamp_limit(Some("1")), 1);
        assert_eq!(clamp_limit(Some("42")), 42);
        assert_eq!(clamp_limit(Some("100")), 100);
        assert_eq!(clamp_limit(Some("101")), 100);
        assert_eq!(clamp_limit(Some("5000")), 100);
    }
}
