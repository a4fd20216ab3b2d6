//! Lambda entry point for the Improv Index API.

use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use improv_index_lambda_api::{handle, AppState};
use improv_index_lambda_shared::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    // Clients and secrets are built once at cold start and shared read-only
    // across invocations.
    let state = Arc::new(AppState::from_env().await?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let state = Arc::clone(&state);
        async move {
            let request_id = event.context.request_id.clone();
            Ok::<_, Error>(handle(&state, &request_id, event.payload).await)
        }
    }))
    .await
}
