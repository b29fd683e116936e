use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::Value as JsonValue;

/// Header and query parameter map.
pub type StringMap = BTreeMap<String, String>;

/// A single logical call to the API.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute target URL.
    pub url: String,
    /// Caller headers, merged over the authorization header.
    pub headers: Option<StringMap>,
    /// JSON body.
    pub body: Option<JsonValue>,
    /// Query string parameters.
    pub params: Option<StringMap>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: None,
            body: None,
            params: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Adds one caller header. Later values replace earlier ones.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert_header(
            self.headers.get_or_insert_with(StringMap::new),
            name.into(),
            value.into(),
        );
        self
    }

    /// Adds several caller headers.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = self.headers.get_or_insert_with(StringMap::new);
        for (name, value) in headers {
            insert_header(map, name.into(), value.into());
        }
        self
    }

    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds one query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(StringMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Returns the caller header with the given name, ignoring ASCII case.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }
}

/// Builds the outgoing header set: `base` with `overrides` applied on top.
///
/// Header names compare case-insensitively, so an override replaces the base
/// entry instead of sending both.
pub(crate) fn merge_headers(base: StringMap, overrides: Option<&StringMap>) -> StringMap {
    let mut merged = base;
    if let Some(overrides) = overrides {
        for (name, value) in overrides {
            insert_header(&mut merged, name.clone(), value.clone());
        }
    }
    merged
}

fn insert_header(map: &mut StringMap, name: String, value: String) {
    map.retain(|key, _| !key.eq_ignore_ascii_case(&name));
    map.insert(name, value);
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use super::{merge_headers, ApiRequest, StringMap};

    fn base() -> StringMap {
        StringMap::from([("Authorization".to_owned(), "ApiKey api-key".to_owned())])
    }

    #[test]
    fn merge_without_overrides_keeps_base() {
        assert_eq!(merge_headers(base(), None), base());
    }

    #[test]
    fn caller_headers_are_added() {
        let overrides = StringMap::from([("MyHeader".to_owned(), "value".to_owned())]);
        let merged = merge_headers(base(), Some(&overrides));
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["Authorization"], "ApiKey api-key");
        assert_eq!(merged["MyHeader"], "value");
    }

    #[test]
    fn caller_wins_on_collision_regardless_of_case() {
        let overrides = StringMap::from([("authorization".to_owned(), "Bearer other".to_owned())]);
        let merged = merge_headers(base(), Some(&overrides));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["authorization"], "Bearer other");
    }

    #[test]
    fn builder_collects_parts() {
        let request = ApiRequest::post("https://api.novu.co/v1/events/trigger")
            .header("Idempotency-Key", "abc")
            .query("page", "0")
            .json(json!({"name": "welcome"}));

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.header_value("idempotency-key"), Some("abc"));
        assert_eq!(request.params.as_ref().map(|p| p["page"].as_str()), Some("0"));
        assert_eq!(request.body, Some(json!({"name": "welcome"})));
    }

    #[test]
    fn bare_request_has_no_optional_parts() {
        let request = ApiRequest::get("sample.novu.com");
        assert!(request.headers.is_none());
        assert!(request.body.is_none());
        assert!(request.params.is_none());
    }
}
