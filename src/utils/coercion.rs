//! Coerción tolerante de celdas de la planilla
//!
//! La planilla devuelve celdas como strings, números, booleanos o null según
//! cómo fueron cargadas. Estas funciones convierten cualquier celda al tipo
//! esperado sin fallar nunca.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Convertir una celda a string. `null` y ausencia dan string vacío.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // Celdas compuestas no tienen representación útil
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Convertir una celda a número. Cualquier valor no interpretable da 0,
/// nunca NaN ni infinito.
pub fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };

    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Truncar una fecha o timestamp a la parte de fecha (antes de la `T`)
pub fn truncate_date(raw: &str) -> String {
    raw.split('T').next().unwrap_or_default().to_string()
}

/// `deserialize_with` para campos string que pueden llegar como número o null
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string(&value))
}

/// `deserialize_with` para campos numéricos que pueden llegar como string
pub fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

/// `deserialize_with` para strings opcionales donde "" significa ausente
pub fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let text = coerce_string(&value);
    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!("1500")), 1500.0);
        assert_eq!(coerce_number(&json!(" 12.5 ")), 12.5);
        assert_eq!(coerce_number(&json!(800)), 800.0);
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!("")), 0.0);
        assert_eq!(coerce_number(&json!("abc")), 0.0);
        assert_eq!(coerce_number(&json!("NaN")), 0.0);
        assert_eq!(coerce_number(&json!("inf")), 0.0);
        assert_eq!(coerce_number(&json!({ "x": 1 })), 0.0);
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce_string(&json!("EQ-001")), "EQ-001");
        assert_eq!(coerce_string(&json!(1)), "1");
        assert_eq!(coerce_string(&json!(2022)), "2022");
        assert_eq!(coerce_string(&json!(null)), "");
    }

    #[test]
    fn test_truncate_date() {
        assert_eq!(truncate_date("2023-11-15T00:00:00Z"), "2023-11-15");
        assert_eq!(truncate_date("2023-11-15"), "2023-11-15");
        assert_eq!(truncate_date(""), "");
    }
}
