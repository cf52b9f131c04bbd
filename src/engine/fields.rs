//! Order field collection: validate user input against a payment scheme.

use crate::domain::currency::{FieldKind, FieldSpec, FieldValue};
use std::collections::HashMap;
use thiserror::Error;

/// Raw user input for one scheme field, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Typed text (int and str fields).
    Text(String),
    /// File key of an uploaded batch (image fields).
    FileKey(String),
}

/// Validation failure, attached to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field {0} is required")]
    Missing(String),
    #[error("field {0} must be an integer")]
    NotAnInteger(String),
    #[error("field {0} must not be empty")]
    Empty(String),
    #[error("field {0} requires an uploaded file")]
    NotAFileKey(String),
}

/// Validate and coerce inputs against a scheme.
///
/// Integer fields are parse-coerced, empty optional fields are dropped from
/// the payload entirely, image fields carry the upload batch key. Inputs
/// with no matching spec are ignored.
pub fn collect_fields(
    specs: &[FieldSpec],
    inputs: &HashMap<String, FieldInput>,
) -> Result<HashMap<String, FieldValue>, FieldError> {
    let mut out = HashMap::new();
    for spec in specs {
        let input = inputs.get(&spec.key);
        let empty = match input {
            None => true,
            Some(FieldInput::Text(t)) => t.trim().is_empty(),
            Some(FieldInput::FileKey(k)) => k.is_empty(),
        };
        if empty {
            if spec.optional {
                continue;
            }
            return Err(FieldError::Missing(spec.key.clone()));
        }
        let value = match (spec.kind, input) {
            (FieldKind::Int, Some(FieldInput::Text(t))) => {
                let parsed = t
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| FieldError::NotAnInteger(spec.key.clone()))?;
                FieldValue::Int(parsed)
            }
            (FieldKind::Str, Some(FieldInput::Text(t))) => FieldValue::Str(t.trim().to_string()),
            (FieldKind::Image, Some(FieldInput::FileKey(k))) => FieldValue::FileKey(k.clone()),
            (FieldKind::Image, Some(FieldInput::Text(_))) => {
                return Err(FieldError::NotAFileKey(spec.key.clone()))
            }
            (_, Some(FieldInput::FileKey(_))) => {
                return Err(FieldError::Empty(spec.key.clone()))
            }
            (_, None) => unreachable!("empty inputs handled above"),
        };
        out.insert(spec.key.clone(), value);
    }
    Ok(out)
}

/// Render collected fields as the JSON object `updates.confirmation` expects.
pub fn fields_payload(fields: &HashMap<String, FieldValue>) -> serde_json::Map<String, serde_json::Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), v.as_json()))
        .collect()
}
