//! Request routing for the Improv Index API Lambda.
//!
//! Every invocation walks the same path: the raw event is normalized into an
//! [`Endpoint`], `OPTIONS` requests short-circuit to a CORS preflight
//! response, and everything else dispatches on the exact (method, path)
//! pair. The routing boundary guarantees a well-formed [`Envelope`] for
//! every outcome; handler errors are converted here and their detail goes
//! only to the log, never to the caller.

#![deny(warnings)]

use aws_config::BehaviorVersion;
use serde_json::Value;
use tracing::{error, info, warn};

use improv_index_lambda_shared::{Endpoint, Envelope, InboundEvent};
use improv_index_lib::{Error, Secrets, Table};

/// Environment variable naming the activities table.
pub const ACTIVITIES_TABLE_VAR: &str = "ACTIVITIES_TABLE";

/// Process-wide state, built once at cold start and read-only afterwards.
///
/// Concurrent invocations share this through an `Arc`; nothing here is
/// mutated after construction, so no locking is needed.
pub struct AppState {
    pub dynamodb: aws_sdk_dynamodb::Client,
    pub activities_table: Option<String>,
    pub secrets: Secrets,
}

impl AppState {
    /// Build the state from the ambient AWS configuration and environment,
    /// loading secrets once. Called from `main` before the runtime starts.
    pub async fn from_env() -> Result<Self, Error> {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;

        let secrets_client = aws_sdk_secretsmanager::Client::new(&config);
        let secret_name = Secrets::secret_name_from_env();
        let secrets = Secrets::load(&secrets_client, &secret_name).await?;

        Ok(Self {
            dynamodb: aws_sdk_dynamodb::Client::new(&config),
            activities_table: std::env::var(ACTIVITIES_TABLE_VAR)
                .ok()
                .filter(|name| !name.is_empty()),
            secrets,
        })
    }
}

/// Handle one invocation end to end, always producing an envelope.
pub async fn handle(state: &AppState, request_id: &str, payload: Value) -> Envelope {
    let event: InboundEvent = match serde_json::from_value(payload) {
        Ok(event) => event,
        Err(err) => {
            // All event fields default, so this only fires on a payload
            // that is not an object at all.
            error!(request_id = %request_id, error = %err, "failed to parse inbound event");
            return Envelope::error_message("An unexpected error occurred");
        }
    };

    let endpoint = Endpoint::from_event(&event);
    info!(
        request_id = %request_id,
        method = %endpoint.method,
        path = %endpoint.path,
        "processing request"
    );

    // CORS preflight bypasses business dispatch entirely.
    if endpoint.method == "OPTIONS" {
        return Envelope::success_message("CORS preflight");
    }

    let result = match (endpoint.method.as_str(), endpoint.path.as_str()) {
        ("GET", "/activities") => get_activities(state, request_id).await,
        _ => {
            warn!(
                request_id = %request_id,
                method = %endpoint.method,
                path = %endpoint.path,
                "no handler for route"
            );
            // Unmatched routes are a client-correctable failure, not a 404.
            return Envelope::failed_message(&format!(
                "Endpoint not found: {} {}",
                endpoint.method, endpoint.path
            ));
        }
    };

    match result {
        Ok(envelope) => envelope,
        Err(err) => error_envelope(request_id, &err),
    }
}

/// `GET /activities`: scan the whole activities table and return every row.
async fn get_activities(state: &AppState, request_id: &str) -> Result<Envelope, Error> {
    let table = Table::resolve(state.dynamodb.clone(), state.activities_table.clone())?;
    let activities: Vec<Value> = table.scan(None).await?;

    info!(
        request_id = %request_id,
        count = activities.len(),
        "retrieved activities"
    );
    Ok(Envelope::success(
        &activities,
        "Activities retrieved successfully",
    ))
}

/// Single conversion point from handler errors to caller-visible envelopes.
fn error_envelope(request_id: &str, err: &Error) -> Envelope {
    match err {
        // A body that fails to parse is the caller's to fix.
        Error::MalformedRequestBody { .. } => {
            warn!(request_id = %request_id, error = %err, "rejected malformed request body");
            Envelope::failed_message(&err.to_string())
        }
        Error::MissingTableName => {
            error!(request_id = %request_id, error = %err, "required configuration missing");
            Envelope::error_message("Configuration error")
        }
        _ => {
            error!(request_id = %request_id, error = %err, "request handling failed");
            Envelope::error_message("An unexpected error occurred")
        }
    }
}
