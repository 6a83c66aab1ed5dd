//! Bidirectional conversion between host JSON values and the Firestore REST
//! tagged-value wire format.
//!
//! On the wire every field value is a single-key object naming its type
//! (`{"stringValue": "x"}`, `{"integerValue": "42"}`, ...). `DocumentValue`
//! is the typed middle layer: host values are lifted into it with
//! [`DocumentValue::from_host`], written out with [`DocumentValue::to_wire`],
//! and the reverse path goes [`DocumentValue::from_wire`] then
//! [`DocumentValue::into_host`].

use serde_json::{json, Map, Value};

/// A single Firestore document value.
///
/// Integers travel as decimal strings on the wire; timestamps are kept as
/// opaque strings. `Raw` carries any wire value whose tag is unrecognized,
/// so decoding never fails on unknown types and nothing is truncated.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentValue {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Null,
    Timestamp(String),
    Array(Vec<DocumentValue>),
    Map(Vec<(String, DocumentValue)>),
    /// Pass-through for wire values with an unrecognized or malformed tag.
    Raw(Value),
}

impl DocumentValue {
    /// Lift a host JSON value into a typed document value.
    ///
    /// Numbers representable as `i64` become `Integer`; everything else
    /// numeric becomes `Double`. There is no host-side timestamp type, so
    /// timestamps enter as plain strings and only appear on decode.
    pub fn from_host(value: &Value) -> Self {
        match value {
            Value::Null => DocumentValue::Null,
            Value::Bool(b) => DocumentValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => DocumentValue::Integer(i),
                None => DocumentValue::Double(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => DocumentValue::String(s.clone()),
            Value::Array(items) => {
                DocumentValue::Array(items.iter().map(DocumentValue::from_host).collect())
            }
            Value::Object(fields) => DocumentValue::Map(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), DocumentValue::from_host(v)))
                    .collect(),
            ),
        }
    }

    /// Produce the tagged wire representation of this value.
    pub fn to_wire(&self) -> Value {
        match self {
            DocumentValue::String(s) => json!({ "stringValue": s }),
            DocumentValue::Integer(i) => json!({ "integerValue": i.to_string() }),
            DocumentValue::Double(f) => json!({ "doubleValue": f }),
            DocumentValue::Boolean(b) => json!({ "booleanValue": b }),
            DocumentValue::Null => json!({ "nullValue": null }),
            DocumentValue::Timestamp(s) => json!({ "timestampValue": s }),
            DocumentValue::Array(items) => {
                let values: Vec<Value> = items.iter().map(DocumentValue::to_wire).collect();
                json!({ "arrayValue": { "values": values } })
            }
            DocumentValue::Map(entries) => {
                let mut fields = Map::new();
                for (key, entry) in entries {
                    fields.insert(key.clone(), entry.to_wire());
                }
                json!({ "mapValue": { "fields": fields } })
            }
            DocumentValue::Raw(v) => v.clone(),
        }
    }

    /// Parse a tagged wire value.
    ///
    /// Dispatches on which tag key is present. An absent `values` list or
    /// `fields` map is treated as empty. A value with no recognizable tag,
    /// or whose payload has the wrong shape, is carried through unchanged
    /// as `Raw` rather than rejected.
    pub fn from_wire(value: &Value) -> Self {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => return DocumentValue::Raw(value.clone()),
        };

        if let Some(s) = obj.get("stringValue").and_then(Value::as_str) {
            return DocumentValue::String(s.to_string());
        }
        if let Some(raw) = obj.get("integerValue") {
            // Decimal-string form; a bare number is accepted as well.
            if let Some(i) = raw.as_str().and_then(|s| s.parse::<i64>().ok()) {
                return DocumentValue::Integer(i);
            }
            if let Some(i) = raw.as_i64() {
                return DocumentValue::Integer(i);
            }
            // Out-of-range integers are preserved verbatim, never truncated.
            return DocumentValue::Raw(value.clone());
        }
        if let Some(f) = obj.get("doubleValue").and_then(Value::as_f64) {
            return DocumentValue::Double(f);
        }
        if let Some(b) = obj.get("booleanValue").and_then(Value::as_bool) {
            return DocumentValue::Boolean(b);
        }
        if obj.contains_key("nullValue") {
            return DocumentValue::Null;
        }
        if let Some(s) = obj.get("timestampValue").and_then(Value::as_str) {
            return DocumentValue::Timestamp(s.to_string());
        }
        if let Some(array) = obj.get("arrayValue") {
            let items = array
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(DocumentValue::from_wire).collect())
                .unwrap_or_default();
            return DocumentValue::Array(items);
        }
        if let Some(map) = obj.get("mapValue") {
            let entries = map
                .get("fields")
                .and_then(Value::as_object)
                .map(|fields| {
                    fields
                        .iter()
                        .map(|(k, v)| (k.clone(), DocumentValue::from_wire(v)))
                        .collect()
                })
                .unwrap_or_default();
            return DocumentValue::Map(entries);
        }

        DocumentValue::Raw(value.clone())
    }

    /// Lower this value back into a host JSON value.
    pub fn into_host(self) -> Value {
        match self {
            DocumentValue::String(s) => Value::String(s),
            DocumentValue::Integer(i) => Value::from(i),
            DocumentValue::Double(f) => Value::from(f),
            DocumentValue::Boolean(b) => Value::Bool(b),
            DocumentValue::Null => Value::Null,
            DocumentValue::Timestamp(s) => Value::String(s),
            DocumentValue::Array(items) => {
                Value::Array(items.into_iter().map(DocumentValue::into_host).collect())
            }
            DocumentValue::Map(entries) => {
                let mut fields = Map::new();
                for (key, entry) in entries {
                    fields.insert(key, entry.into_host());
                }
                Value::Object(fields)
            }
            DocumentValue::Raw(v) => v,
        }
    }
}

/// Encode a single host value into its tagged wire form.
pub fn encode_value(value: &Value) -> Value {
    DocumentValue::from_host(value).to_wire()
}

/// Decode a single tagged wire value into a host value.
pub fn decode_value(value: &Value) -> Value {
    DocumentValue::from_wire(value).into_host()
}

/// Encode a host map into the `fields` object of a document body.
pub fn encode_fields(data: &Map<String, Value>) -> Value {
    let mut fields = Map::new();
    for (key, value) in data {
        fields.insert(key.clone(), encode_value(value));
    }
    Value::Object(fields)
}

/// Decode a wire document into a host map.
///
/// Returns `None` when the document has no `fields` key, which call sites
/// use as the "document does not exist" sentinel.
pub fn decode_document(document: &Value) -> Option<Map<String, Value>> {
    let fields = document.get("fields")?.as_object()?;
    let mut result = Map::new();
    for (key, value) in fields {
        result.insert(key.clone(), decode_value(value));
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(value: Value) -> Value {
        decode_value(&encode_value(&value))
    }

    #[test]
    fn scalars_round_trip() {
        assert_eq!(round_trip(json!("hello")), json!("hello"));
        assert_eq!(round_trip(json!(42)), json!(42));
        assert_eq!(round_trip(json!(-7)), json!(-7));
        assert_eq!(round_trip(json!(2.5)), json!(2.5));
        assert_eq!(round_trip(json!(true)), json!(true));
        assert_eq!(round_trip(json!(false)), json!(false));
        assert_eq!(round_trip(json!(null)), json!(null));
    }

    #[test]
    fn integers_encode_as_decimal_strings() {
        assert_eq!(encode_value(&json!(42)), json!({ "integerValue": "42" }));
        assert_eq!(
            encode_value(&json!(i64::MIN)),
            json!({ "integerValue": i64::MIN.to_string() })
        );
    }

    #[test]
    fn doubles_stay_doubles() {
        // A whole-number float must not collapse into an integer.
        assert_eq!(encode_value(&json!(3.0)), json!({ "doubleValue": 3.0 }));
        assert_eq!(round_trip(json!(3.0)), json!(3.0));
        assert!(round_trip(json!(3.0)).is_f64());
    }

    #[test]
    fn nested_structures_round_trip() {
        let value = json!({
            "title": "Cook",
            "is_avail": true,
            "tags": ["fast", "am"],
            "meta": {
                "scores": [1, 2.5, null],
                "inner": { "deep": ["x", { "y": false }] }
            }
        });
        assert_eq!(round_trip(value.clone()), value);
    }

    #[test]
    fn map_key_order_is_preserved() {
        let value = json!({ "zeta": 1, "alpha": 2, "mid": 3 });
        let decoded = round_trip(value);
        let keys: Vec<&String> = decoded.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn timestamps_decode_to_strings() {
        let wire = json!({ "timestampValue": "2024-05-01T12:00:00Z" });
        assert_eq!(decode_value(&wire), json!("2024-05-01T12:00:00Z"));
    }

    #[test]
    fn unknown_tags_pass_through_unchanged() {
        let wire = json!({ "geoPointValue": { "latitude": 1.0, "longitude": 2.0 } });
        assert_eq!(decode_value(&wire), wire);
    }

    #[test]
    fn oversized_wire_integers_pass_through_unchanged() {
        let wire = json!({ "integerValue": "99999999999999999999999999" });
        assert_eq!(decode_value(&wire), wire);
    }

    #[test]
    fn missing_array_values_decode_empty() {
        assert_eq!(decode_value(&json!({ "arrayValue": {} })), json!([]));
        assert_eq!(decode_value(&json!({ "mapValue": {} })), json!({}));
    }

    #[test]
    fn document_without_fields_is_absent() {
        assert_eq!(decode_document(&json!({})), None);
        assert_eq!(
            decode_document(&json!({ "name": "projects/p/databases/(default)/documents/c/d" })),
            None
        );
    }

    #[test]
    fn document_fields_decode() {
        let wire = json!({
            "fields": {
                "title": { "stringValue": "Cook" },
                "count": { "integerValue": "3" }
            }
        });
        let decoded = decode_document(&wire).unwrap();
        assert_eq!(decoded.get("title"), Some(&json!("Cook")));
        assert_eq!(decoded.get("count"), Some(&json!(3)));
    }
}
