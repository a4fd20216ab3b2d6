//! Structured logging setup shared by every Lambda binary in the workspace.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a JSON tracing subscriber for CloudWatch.
///
/// Call once from `main` before handing control to `lambda_runtime::run`.
/// The filter honors `RUST_LOG` and falls back to `info`. Events are
/// flattened so CloudWatch Logs Insights can query fields directly.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .flatten_event(true),
        )
        .init();
}
