//! Test utilities for Lambda handler testing.
//!
//! Provides raw API Gateway proxy event fixtures shaped like the payloads
//! the hosting runtime delivers, so handler tests exercise the same
//! deserialization path as production.
//!
//! These utilities are only available in test builds or behind the
//! `test-utils` feature.

use serde_json::{json, Value};

/// Build a minimal API Gateway proxy event for the given method and path.
pub fn api_event(method: &str, path: &str) -> Value {
    json!({
        "httpMethod": method,
        "resource": path,
        "pathParameters": null,
        "queryStringParameters": null,
        "body": null
    })
}

/// Build a proxy event carrying a raw request body.
pub fn api_event_with_body(method: &str, path: &str, body: &str) -> Value {
    let mut event = api_event(method, path);
    event["body"] = Value::String(body.to_string());
    event
}

/// Create a mock request ID for testing.
///
/// Since `lambda_runtime::Context` is non-exhaustive and cannot be directly
/// constructed, tests should use the request ID directly for assertions.
pub fn mock_request_id(suffix: &str) -> String {
    format!("test-request-{}", suffix)
}
