//! Currency and payment-method types.

use serde::{Deserialize, Serialize};

/// A currency as the server describes it. Immutable on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Identifier string, e.g. "usd".
    pub id_str: String,
    /// Digits after the point for display amounts.
    pub decimal: u32,
    /// Digits after the point for rates.
    pub rate_decimal: u32,
    /// Minimum divisible unit on the currency side, in scaled units.
    pub div: i64,
}

impl Currency {
    pub fn new(id_str: impl Into<String>, decimal: u32, rate_decimal: u32, div: i64) -> Self {
        Currency {
            id_str: id_str.into(),
            decimal,
            rate_decimal,
            div,
        }
    }
}

/// Kind of a payment scheme field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Int,
    Str,
    Image,
}

/// Specification of one payment-scheme field.
///
/// `name_text_key` resolves to a localized label through the text pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub optional: bool,
    pub name_text_key: String,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, kind: FieldKind, optional: bool) -> Self {
        let key = key.into();
        let name_text_key = format!("field_{}", key);
        FieldSpec {
            key,
            kind,
            optional,
            name_text_key,
        }
    }
}

/// A collected field value, as it travels in an order payload.
///
/// Image fields carry the opaque file key of an out-of-band upload batch,
/// never the bytes themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Str(String),
    FileKey(String),
}

impl FieldValue {
    pub fn as_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Int(i) => serde_json::Value::from(*i),
            FieldValue::Str(s) | FieldValue::FileKey(s) => serde_json::Value::from(s.clone()),
        }
    }
}

/// A payment scheme: which fields each side must provide to settle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub id: i64,
    pub currency: Currency,
    pub name_text_key: String,
    /// Fields the requisite owner fills when registering a destination.
    pub schema_fields: Vec<FieldSpec>,
    /// Fields the payer fills when confirming an order.
    pub input_fields: Vec<FieldSpec>,
    pub color: Option<String>,
    pub bgcolor: Option<String>,
}

impl Method {
    /// Image fields are only valid on the payer side.
    pub fn is_valid(&self) -> bool {
        self.schema_fields
            .iter()
            .all(|f| f.kind != FieldKind::Image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method_with(schema: Vec<FieldSpec>, input: Vec<FieldSpec>) -> Method {
        Method {
            id: 1,
            currency: Currency::new("usd", 2, 2, 1),
            name_text_key: "method_1_name".to_string(),
            schema_fields: schema,
            input_fields: input,
            color: None,
            bgcolor: None,
        }
    }

    #[test]
    fn test_image_only_in_input_fields() {
        let ok = method_with(
            vec![FieldSpec::new("card", FieldKind::Str, false)],
            vec![FieldSpec::new("receipt", FieldKind::Image, true)],
        );
        assert!(ok.is_valid());

        let bad = method_with(
            vec![FieldSpec::new("photo", FieldKind::Image, false)],
            vec![],
        );
        assert!(!bad.is_valid());
    }

    #[test]
    fn test_field_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&FieldKind::Image).unwrap(),
            "\"image\""
        );
        assert_eq!(serde_json::to_string(&FieldKind::Int).unwrap(), "\"int\"");
    }

    #[test]
    fn test_field_value_json() {
        assert_eq!(FieldValue::Int(100).as_json(), serde_json::json!(100));
        assert_eq!(
            FieldValue::FileKey("K1".to_string()).as_json(),
            serde_json::json!("K1")
        );
    }
}
