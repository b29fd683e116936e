use serde_json::{Map, Value as JsonValue};

use crate::{transport::TransportResponse, NovuError};

/// Parses a successful response body.
///
/// Empty and undecodable bodies both read as an empty object.
pub(crate) fn decode_success(response: &TransportResponse) -> JsonValue {
    if response.status == 204 || response.body.trim().is_empty() {
        return empty_object();
    }
    serde_json::from_str(&response.body).unwrap_or_else(|_| empty_object())
}

/// Builds the error for a failed response.
pub(crate) fn decode_failure(response: &TransportResponse) -> NovuError {
    NovuError::Http {
        status: response.status,
        detail: failure_detail(response.status, &response.body),
    }
}

/// Picks the `details` field of a JSON error body, then `message`, then a
/// generic line naming the status.
fn failure_detail(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<JsonValue>(body).ok();
    parsed
        .as_ref()
        .and_then(|json| present(json, "details").or_else(|| present(json, "message")))
        .map(|value| match value {
            JsonValue::String(text) => text.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| format!("request failed with status code {status}"))
}

fn present<'a>(json: &'a JsonValue, field: &str) -> Option<&'a JsonValue> {
    json.get(field).filter(|value| !value.is_null())
}

fn empty_object() -> JsonValue {
    JsonValue::Object(Map::new())
}
