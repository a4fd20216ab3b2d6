//! The uniform response envelope returned for every invocation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;

/// Fixed body emitted when the requested response body cannot be serialized.
pub const SERIALIZATION_FAILURE_BODY: &str =
    r#"{"error": "Internal server error - response serialization failed"}"#;

/// Response structure expected by the API Gateway proxy integration.
///
/// The body is always a valid JSON string and the headers always include the
/// fixed CORS set, so every caller-visible outcome is well formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

fn default_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Methods".to_string(),
            "GET,POST,DELETE,OPTIONS".to_string(),
        ),
        (
            "Access-Control-Allow-Headers".to_string(),
            "content-type".to_string(),
        ),
    ])
}

impl Envelope {
    /// Build an envelope from a status code, serializable body, and optional
    /// extra headers. Caller headers override the defaults on collision. If
    /// the body cannot be serialized, the status is forced to 500 and the
    /// fixed failure body is returned instead.
    pub fn build<T: Serialize>(
        status_code: u16,
        body: &T,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Self {
        let mut headers = default_headers();
        if let Some(extra) = extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        match serde_json::to_string(body) {
            Ok(body) => Self {
                status_code,
                headers,
                body,
            },
            Err(err) => {
                error!(error = %err, "response body serialization failed");
                Self {
                    status_code: 500,
                    headers,
                    body: SERIALIZATION_FAILURE_BODY.to_string(),
                }
            }
        }
    }

    /// 200 envelope carrying `data` beside the message.
    pub fn success<T: Serialize>(data: &T, message: &str) -> Self {
        Self::with_data(200, data, message)
    }

    /// 200 envelope with only a message.
    pub fn success_message(message: &str) -> Self {
        Self::message_only(200, message)
    }

    /// 400 envelope carrying `data` beside the message.
    pub fn failed<T: Serialize>(data: &T, message: &str) -> Self {
        Self::with_data(400, data, message)
    }

    /// 400 envelope with only a message.
    pub fn failed_message(message: &str) -> Self {
        Self::message_only(400, message)
    }

    /// 500 envelope carrying `data` beside the message.
    pub fn error<T: Serialize>(data: &T, message: &str) -> Self {
        Self::with_data(500, data, message)
    }

    /// 500 envelope with only a message.
    pub fn error_message(message: &str) -> Self {
        Self::message_only(500, message)
    }

    // Shared merge rule: object data merges its keys into the top level
    // beside `message`, anything else nests under a `data` key, and null is
    // treated as no data at all.
    fn with_data<T: Serialize>(status_code: u16, data: &T, message: &str) -> Self {
        let mut body = Map::new();
        body.insert("message".to_string(), Value::String(message.to_string()));

        match serde_json::to_value(data) {
            Ok(Value::Object(map)) => body.extend(map),
            Ok(Value::Null) => {}
            Ok(other) => {
                body.insert("data".to_string(), other);
            }
            Err(err) => {
                error!(error = %err, "response data serialization failed");
                return Self {
                    status_code: 500,
                    headers: default_headers(),
                    body: SERIALIZATION_FAILURE_BODY.to_string(),
                };
            }
        }

        Self::build(status_code, &Value::Object(body), None)
    }

    fn message_only(status_code: u16, message: &str) -> Self {
        let mut body = Map::new();
        body.insert("message".to_string(), Value::String(message.to_string()));
        Self::build(status_code, &Value::Object(body), None)
    }

    /// Parse the body back into JSON for assertions. The body is valid JSON
    /// by construction, so a parse failure is itself a test failure.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn body_json(&self) -> Value {
        serde_json::from_str(&self.body).expect("envelope body is always valid JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde_json::json;

    /// A type whose serialization always fails, for exercising the
    /// serialization-failure fallback.
    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("deliberately unserializable"))
        }
    }

    #[test]
    fn success_merges_object_data_into_top_level() {
        let envelope = Envelope::success(&json!({"a": 1}), "Success");
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.body_json(), json!({"message": "Success", "a": 1}));
    }

    #[test]
    fn success_nests_non_object_data_under_data_key() {
        let envelope = Envelope::success(&json!([1, 2, 3]), "Success");
        assert_eq!(envelope.status_code, 200);
        assert_eq!(
            envelope.body_json(),
            json!({"message": "Success", "data": [1, 2, 3]})
        );
    }

    #[test]
    fn message_only_envelopes_carry_just_the_message() {
        let envelope = Envelope::failed_message("Failed");
        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.body_json(), json!({"message": "Failed"}));

        let envelope = Envelope::error_message("Error");
        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.body_json(), json!({"message": "Error"}));
    }

    #[test]
    fn null_data_is_treated_as_absent() {
        let envelope = Envelope::success(&Value::Null, "Success");
        assert_eq!(envelope.body_json(), json!({"message": "Success"}));
    }

    #[test]
    fn unserializable_data_forces_fixed_500_body() {
        let envelope = Envelope::success(&Unserializable, "Success");
        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.body, SERIALIZATION_FAILURE_BODY);
        // The fallback body itself must still be valid JSON.
        assert_eq!(
            envelope.body_json()["error"],
            "Internal server error - response serialization failed"
        );
    }

    #[test]
    fn build_forces_500_when_body_serialization_fails() {
        let envelope = Envelope::build(200, &Unserializable, None);
        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.body, SERIALIZATION_FAILURE_BODY);
    }

    #[test]
    fn default_headers_include_cors_set() {
        let envelope = Envelope::success_message("Success");
        assert_eq!(envelope.headers["Content-Type"], "application/json");
        assert_eq!(envelope.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(
            envelope.headers["Access-Control-Allow-Methods"],
            "GET,POST,DELETE,OPTIONS"
        );
        assert_eq!(
            envelope.headers["Access-Control-Allow-Headers"],
            "content-type"
        );
    }

    #[test]
    fn caller_headers_override_defaults() {
        let extra = HashMap::from([
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("X-Request-Id".to_string(), "abc-123".to_string()),
        ]);
        let envelope = Envelope::build(200, &json!({}), Some(&extra));
        assert_eq!(envelope.headers["Content-Type"], "text/plain");
        assert_eq!(envelope.headers["X-Request-Id"], "abc-123");
        assert_eq!(envelope.headers["Access-Control-Allow-Origin"], "*");
    }

    #[test]
    fn status_codes_stay_in_the_fixed_set() {
        for envelope in [
            Envelope::success(&json!({"a": 1}), "Success"),
            Envelope::failed(&json!([1]), "Failed"),
            Envelope::error(&json!("detail"), "Error"),
            Envelope::success(&Unserializable, "Success"),
        ] {
            assert!([200, 400, 500].contains(&envelope.status_code));
            // Body must always parse as JSON.
            let _ = envelope.body_json();
        }
    }

    #[test]
    fn envelope_serializes_with_api_gateway_field_names() {
        let envelope = Envelope::success_message("Success");
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("statusCode").is_some());
        assert!(json.get("headers").is_some());
        assert!(json["body"].is_string());
    }
}
