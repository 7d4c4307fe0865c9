//! Response envelope handling and tolerant field decoding
//!
//! Most endpoints wrap their payload as `{"status": "...", "body": ...}`, but
//! not all of them, and the same logical field is spelled differently across
//! endpoints (`Suffix` vs `suffix`, `ImageURL` vs `container_image`). Numbers
//! sometimes arrive as strings. Models are therefore decoded from an untyped
//! `serde_json::Value` through [`Fields`], which accepts every known spelling.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::config::{api, headers};
use crate::error::{Result, ThetaError};

/// Parse a decoded response body as JSON
pub fn parse_json(bytes: &[u8], context: &str) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| {
        ThetaError::decode(
            context,
            format!("{} (body: {})", e, redacted_text(bytes)),
        )
    })
}

/// Status string of an envelope, if the value is one
pub fn envelope_status(value: &Value) -> Option<&str> {
    value.as_object()?.get("status")?.as_str()
}

/// Require a `{status: "success", body}` envelope and return its body
pub fn expect_success(value: Value, context: &str) -> Result<Value> {
    let status = envelope_status(&value)
        .ok_or_else(|| ThetaError::decode(context, "response is not a {status, body} envelope"))?
        .to_string();

    if status != api::STATUS_SUCCESS {
        return Err(ThetaError::Api {
            context: context.to_string(),
            status,
            body: redact(&value).to_string(),
        });
    }

    Ok(take_body(value))
}

/// Accept either an envelope or a bare payload
///
/// Some endpoints answer with the resource object directly; when a `status`
/// field is present the envelope rules of [`expect_success`] apply.
pub fn unwrap_optional_envelope(value: Value, context: &str) -> Result<Value> {
    let is_envelope = value
        .as_object()
        .map(|o| o.get("status").is_some_and(Value::is_string) && o.contains_key("body"))
        .unwrap_or(false);

    if is_envelope {
        expect_success(value, context)
    } else {
        Ok(value)
    }
}

/// Accept a delete response: an empty body or a success envelope
pub fn expect_deleted(value: Value, context: &str) -> Result<()> {
    if value.is_null() {
        return Ok(());
    }
    expect_success(value, context).map(|_| ())
}

fn take_body(value: Value) -> Value {
    match value {
        Value::Object(mut map) => map.remove("body").unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Locate the list of records inside a list response body
///
/// Accepts a bare array, or an object holding the array under one of `keys`,
/// or, failing that, under its only array-valued field.
pub fn records<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(map) => {
            for key in keys {
                if let Some(Value::Array(items)) = map.get(*key) {
                    return Some(items);
                }
            }
            let mut arrays = map.values().filter_map(Value::as_array);
            match (arrays.next(), arrays.next()) {
                (Some(only), None) => Some(only),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Read-only view over a JSON object that tolerates key spelling and type drift
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// View a value as an object, failing with a decode error otherwise
    pub fn of(value: &'a Value, context: &str) -> Result<Self> {
        value
            .as_object()
            .map(Self::new)
            .ok_or_else(|| ThetaError::decode(context, format!("expected an object, got {}", value)))
    }

    /// First non-null value among the given spellings
    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|k| self.map.get(*k))
            .find(|v| !v.is_null())
    }

    /// String field; numbers and booleans are rendered as text
    pub fn str(&self, keys: &[&str]) -> Option<String> {
        match self.first(keys)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Array field
    pub fn array(&self, key: &str) -> Option<&'a Vec<Value>> {
        self.map.get(key).and_then(Value::as_array)
    }

    /// String field, empty when absent
    pub fn str_or_default(&self, keys: &[&str]) -> String {
        self.str(keys).unwrap_or_default()
    }

    /// Integer field, accepting string-encoded numbers
    pub fn int(&self, keys: &[&str]) -> Option<i64> {
        as_int(self.first(keys)?)
    }

    /// Boolean field, accepting "true"/"false" strings
    pub fn bool(&self, keys: &[&str]) -> Option<bool> {
        match self.first(keys)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Map of strings; a JSON-encoded object string is accepted too
    pub fn string_map(&self, keys: &[&str]) -> Option<BTreeMap<String, String>> {
        as_string_map(self.first(keys)?)
    }

    /// List of strings; a JSON-encoded array string is accepted too
    pub fn string_list(&self, keys: &[&str]) -> Option<Vec<String>> {
        match self.first(keys)? {
            Value::Array(items) => Some(items.iter().filter_map(scalar_to_string).collect()),
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Array(items)) => {
                    Some(items.iter().filter_map(scalar_to_string).collect())
                }
                _ if s.trim().is_empty() => Some(Vec::new()),
                _ => Some(vec![s.clone()]),
            },
            _ => None,
        }
    }
}

/// Integer from a number or a string-encoded number
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String map from an object or from JSON text holding one
pub fn as_string_map(value: &Value) -> Option<BTreeMap<String, String>> {
    match value {
        Value::Object(map) => Some(stringify_map(map)),
        Value::String(s) if s.trim().is_empty() => Some(BTreeMap::new()),
        Value::String(s) => match serde_json::from_str::<Value>(s).ok()? {
            Value::Object(map) => Some(stringify_map(&map)),
            _ => None,
        },
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn stringify_map(map: &Map<String, Value>) -> BTreeMap<String, String> {
    map.iter()
        .filter_map(|(k, v)| scalar_to_string(v).map(|s| (k.clone(), s)))
        .collect()
}

/// Copy of `value` with sensitive fields masked
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let masked = if headers::SENSITIVE_KEYS.contains(&k.to_ascii_lowercase().as_str()) {
                        Value::String("***".to_string())
                    } else {
                        redact(v)
                    };
                    (k.clone(), masked)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

/// Printable form of a raw body with sensitive JSON fields masked
pub fn redacted_text(bytes: &[u8]) -> String {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => redact(&value).to_string(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expect_success_returns_body() {
        let body = expect_success(json!({"status": "success", "body": {"id": "x"}}), "test").unwrap();
        assert_eq!(body["id"], "x");
    }

    #[test]
    fn test_expect_success_rejects_error_status() {
        let err = expect_success(json!({"status": "error", "body": "nope"}), "creating project")
            .unwrap_err();
        match err {
            ThetaError::Api { status, context, .. } => {
                assert_eq!(status, "error");
                assert_eq!(context, "creating project");
            }
            other => panic!("Expected ThetaError::Api, got {:?}", other),
        }
    }

    #[test]
    fn test_expect_success_requires_envelope() {
        let err = expect_success(json!([1, 2, 3]), "listing").unwrap_err();
        assert!(matches!(err, ThetaError::Decode { .. }));
    }

    #[test]
    fn test_unwrap_optional_envelope_bare_object() {
        let value = unwrap_optional_envelope(json!({"id": "img_1", "name": "t"}), "template").unwrap();
        assert_eq!(value["id"], "img_1");
    }

    #[test]
    fn test_unwrap_optional_envelope_enveloped() {
        let value = unwrap_optional_envelope(
            json!({"status": "success", "body": {"id": "img_1"}}),
            "template",
        )
        .unwrap();
        assert_eq!(value["id"], "img_1");
    }

    #[test]
    fn test_expect_deleted_accepts_empty_and_success() {
        assert!(expect_deleted(Value::Null, "deleting").is_ok());
        assert!(expect_deleted(json!({"status": "success", "body": true}), "deleting").is_ok());
        assert!(expect_deleted(json!({"status": "fail", "body": false}), "deleting").is_err());
    }

    #[test]
    fn test_records_shapes() {
        let bare = json!([{"a": 1}]);
        assert_eq!(records(&bare, &[]).unwrap().len(), 1);

        let keyed = json!({"templates": [{"a": 1}, {"a": 2}], "page": 0});
        assert_eq!(records(&keyed, &["templates"]).unwrap().len(), 2);

        let single_array = json!({"items": [{"a": 1}], "total": "1"});
        assert_eq!(records(&single_array, &["deployments"]).unwrap().len(), 1);

        assert!(records(&json!("text"), &[]).is_none());
    }

    #[test]
    fn test_fields_accepts_alternate_spellings() {
        let upper = json!({"Suffix": "abc", "Replicas": 2});
        let lower = json!({"suffix": "abc", "min_replicas": "2"});

        for value in [&upper, &lower] {
            let f = Fields::of(value, "test").unwrap();
            assert_eq!(f.str(&["suffix", "Suffix"]).as_deref(), Some("abc"));
            assert_eq!(f.int(&["min_replicas", "Replicas"]), Some(2));
        }
    }

    #[test]
    fn test_fields_skips_null_spelling() {
        let value = json!({"name": null, "Name": "real"});
        let f = Fields::of(&value, "test").unwrap();
        assert_eq!(f.str(&["name", "Name"]).as_deref(), Some("real"));
    }

    #[test]
    fn test_fields_string_map_from_json_text() {
        let value = json!({"env_vars": "{\"A\":\"1\",\"B\":2}"});
        let f = Fields::of(&value, "test").unwrap();
        let map = f.string_map(&["env_vars"]).unwrap();
        assert_eq!(map.get("A").map(String::as_str), Some("1"));
        assert_eq!(map.get("B").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_fields_bool_and_list() {
        let value = json!({"disabled": "true", "tags": ["LLM", "API"]});
        let f = Fields::of(&value, "test").unwrap();
        assert_eq!(f.bool(&["disabled"]), Some(true));
        assert_eq!(f.string_list(&["tags"]).unwrap(), vec!["LLM", "API"]);
    }

    #[test]
    fn test_fields_of_non_object_is_decode_error() {
        let err = Fields::of(&json!("text"), "deployment").unwrap_err();
        assert!(matches!(err, ThetaError::Decode { .. }));
    }

    #[test]
    fn test_redact_masks_secrets_recursively() {
        let value = json!({
            "email": "me@example.com",
            "password": "hunter2",
            "nested": [{"api_secret": "s3cr3t", "keep": "ok"}]
        });
        let text = redact(&value).to_string();
        assert!(!text.contains("hunter2"));
        assert!(!text.contains("s3cr3t"));
        assert!(text.contains("me@example.com"));
        assert!(text.contains("ok"));
    }

    #[test]
    fn test_parse_json_error_is_redacted() {
        let err = parse_json(b"not json {\"password\"", "login").unwrap_err();
        assert!(matches!(err, ThetaError::Decode { .. }));
    }
}
