//! Normalization of inbound API Gateway proxy events.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use improv_index_lib::{Error, Result};

/// Raw API Gateway proxy event fields this API consumes.
///
/// Every field defaults when absent and unknown payload fields are ignored,
/// so any event the hosting runtime delivers deserializes without error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundEvent {
    pub http_method: Option<String>,
    pub resource: Option<String>,
    pub path_parameters: Option<HashMap<String, String>>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

impl InboundEvent {
    /// Parse the raw body as JSON.
    ///
    /// An absent or empty body yields an empty object. A body that is
    /// present but not valid JSON fails with
    /// [`Error::MalformedRequestBody`].
    pub fn parse_body(&self) -> Result<Value> {
        match self.body.as_deref() {
            None | Some("") => Ok(Value::Object(Map::new())),
            Some(body) => serde_json::from_str(body).map_err(|err| {
                Error::MalformedRequestBody {
                    message: err.to_string(),
                }
            }),
        }
    }
}

/// Normalized view of one invocation: always-uppercase method, resource
/// path, and never-null parameter maps.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: String,
    pub path: String,
    pub path_params: HashMap<String, String>,
    pub query_params: HashMap<String, String>,
}

impl Endpoint {
    /// Extract the normalized endpoint from an inbound event. Pure; absent
    /// fields become empty strings or empty maps.
    pub fn from_event(event: &InboundEvent) -> Self {
        Self {
            method: event
                .http_method
                .as_deref()
                .unwrap_or_default()
                .to_uppercase(),
            path: event.resource.clone().unwrap_or_default(),
            path_params: event.path_parameters.clone().unwrap_or_default(),
            query_params: event.query_string_parameters.clone().unwrap_or_default(),
        }
    }
}
