use serde_json::Value;
use thiserror::Error;

use crate::RawRecord;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    Json(String),
    #[error("expected a JSON array of projects, found {found}")]
    NotAnArray { found: &'static str },
}

/// Decode a response body into the provider's list of raw project entries.
pub fn decode_projects(bytes: &[u8]) -> Result<Vec<RawRecord>, DecodeError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let value: Value =
        serde_json::from_slice(bytes).map_err(|err| DecodeError::Json(err.to_string()))?;
    match value {
        Value::Array(entries) => Ok(entries),
        other => Err(DecodeError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_array_with_bom() {
        let mut body = UTF8_BOM.to_vec();
        body.extend_from_slice(br#"[{"s.no":0,"amt.pledged":15823}]"#);
        let entries = decode_projects(&body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["amt.pledged"], 15823);
    }

    #[test]
    fn rejects_objects_and_garbage() {
        assert_eq!(
            decode_projects(br#"{"projects":[]}"#),
            Err(DecodeError::NotAnArray {
                found: "an object"
            })
        );
        assert!(matches!(
            decode_projects(b"<html>"),
            Err(DecodeError::Json(_))
        ));
    }
}
