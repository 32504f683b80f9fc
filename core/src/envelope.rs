//! Response envelope handling.
//!
//! The backend is inconsistent about how it wraps payloads: lists arrive
//! bare, some objects arrive as `{"data": ...}`, and deletes answer with
//! `{"mensagem": ...}` or nothing at all. Everything here works on
//! `serde_json::Value` so the shape can be inspected before any typed
//! deserialization happens.

use serde_json::{json, Value};

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Message used when a successful response carries no body.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operacao realizada com sucesso";

/// How strictly the payload shape is checked after a successful response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvelopePolicy {
    /// Accept a bare array, a `{"data": ...}` wrapper, or a bare object.
    #[default]
    Lenient,
    /// Require a `{"data": ...}` wrapper and reject anything else.
    Strict,
}

/// Read the body of `response` into a JSON value.
///
/// Any body that parses as JSON is used as is, whatever its content type.
/// A blank body yields the default success message, or an empty object when
/// the status is a failure so the status-derived message wins. Other text
/// becomes `{"mensagem": <text>}`, except a failure that claims to be JSON:
/// its body is noise (a proxy error page, a truncated reply) and yields an
/// empty object too.
pub fn read_payload(response: &HttpResponse) -> Value {
    if response.body.trim().is_empty() {
        if !response.is_success() {
            return json!({});
        }
        return json!({ "mensagem": DEFAULT_SUCCESS_MESSAGE });
    }
    match serde_json::from_str(&response.body) {
        Ok(payload) => payload,
        Err(_) if response.is_json() && !response.is_success() => json!({}),
        Err(_) => json!({ "mensagem": response.body }),
    }
}

/// Pick the operator-facing message for a failed response.
pub fn error_message(payload: &Value, status: u16, reason: &str) -> String {
    message_field(payload, "erro")
        .or_else(|| message_field(payload, "mensagem"))
        .unwrap_or_else(|| format!("Erro {status}: {reason}"))
}

/// Return the `mensagem` of a success payload, if it carries one.
pub fn success_message(payload: &Value) -> Option<String> {
    message_field(payload, "mensagem")
}

fn message_field(payload: &Value, field: &str) -> Option<String> {
    match payload.get(field)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) => None,
        other => Some(other.to_string()),
    }
}

/// Unwrap the payload of a successful response.
pub fn normalize(payload: Value, policy: EnvelopePolicy) -> Result<Value, ApiError> {
    match (payload, policy) {
        (Value::Object(mut map), _) if map.contains_key("data") => {
            Ok(map.remove("data").unwrap_or(Value::Null))
        }
        (other, EnvelopePolicy::Strict) => Err(ApiError::Contract(format!(
            "esperado objeto com campo data, recebido {}",
            shape_name(&other)
        ))),
        (payload, EnvelopePolicy::Lenient) => Ok(payload),
    }
}

/// Turn whatever a list endpoint returned into a list of records.
pub fn coerce_list(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            Some(data) => {
                map.insert("data".to_string(), data);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        _ => Vec::new(),
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "booleano",
        Value::Number(_) => "numero",
        Value::String(_) => "texto",
        Value::Array(_) => "lista",
        Value::Object(_) => "objeto sem data",
    }
}
