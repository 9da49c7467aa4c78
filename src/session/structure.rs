//! Session structure type and input sniffing.

use serde_json::{Map, Value};

use crate::config::{ForgeError, Result};
use crate::session::pyliteral;

/// Decoded session state: an ordered mapping of field names to JSON values.
///
/// Key order is preserved for display; it carries no meaning on the wire.
pub type SessionStructure = Map<String, Value>;

/// Parses operator-supplied structure text.
///
/// Tries strict JSON first, then the Python-literal subset, so both
/// `{"user": "admin"}` and `{'user': 'admin', 'flag': True}` are accepted.
/// Each attempt is pure; nothing is evaluated.
///
/// # Errors
///
/// Returns [`ForgeError::InvalidStructure`] when neither parser accepts the
/// input, or when the parsed value is not a mapping.
pub fn parse_structure(input: &str) -> Result<SessionStructure> {
    let value = match serde_json::from_str::<Value>(input) {
        Ok(value) => value,
        Err(_) => pyliteral::parse_literal(input)?,
    };
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ForgeError::InvalidStructure(format!(
            "session structure must be a mapping, got {}",
            value_kind(&other)
        ))),
    }
}

/// Renders a structure as JSON text, compact or pretty.
///
/// # Errors
///
/// Returns [`ForgeError::Encoding`] if serialization fails.
pub fn render(structure: &SessionStructure, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(structure)
    } else {
        serde_json::to_string(structure)
    };
    rendered.map_err(|e| ForgeError::Encoding(e.to_string()))
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_strict_json() {
        let structure = parse_structure(r#"{"user": "admin", "id": 3}"#).unwrap();
        assert_eq!(structure.get("user"), Some(&json!("admin")));
        assert_eq!(structure.get("id"), Some(&json!(3)));
    }

    #[test]
    fn test_falls_back_to_python_literals() {
        let structure = parse_structure("{'user': 'admin', 'flag': True}").unwrap();
        assert_eq!(structure.get("flag"), Some(&json!(true)));
    }

    #[test]
    fn test_preserves_key_order() {
        let structure = parse_structure(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = structure.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_rejects_non_mapping_input() {
        assert!(matches!(
            parse_structure("[1, 2, 3]"),
            Err(ForgeError::InvalidStructure(_))
        ));
        assert!(matches!(
            parse_structure("'just a string'"),
            Err(ForgeError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_rejects_unparseable_input() {
        assert!(matches!(
            parse_structure("{definitely not parseable"),
            Err(ForgeError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_rejects_deeply_nested_input() {
        // Both parse attempts must bottom out with an error, not a stack
        // overflow.
        let deep = "[".repeat(200_000);
        assert!(matches!(
            parse_structure(&deep),
            Err(ForgeError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_render_compact_and_pretty() {
        let structure = parse_structure(r#"{"a": 1}"#).unwrap();
        assert_eq!(render(&structure, false).unwrap(), r#"{"a":1}"#);
        assert!(render(&structure, true).unwrap().contains('\n'));
    }
}
