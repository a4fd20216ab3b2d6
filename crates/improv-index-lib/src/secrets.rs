//! Process-wide configuration loaded from AWS Secrets Manager.
//!
//! Secrets are fetched once at cold start, parsed from the secret's JSON
//! string payload, and injected into the handler state. There is no refresh
//! or expiry handling; the loaded values are immutable for the life of the
//! process.

use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{Error, Result};

/// Environment variable naming the secret to load.
pub const SECRET_NAME_VAR: &str = "ENV_SECRET_NAME";

/// Secret name used when [`SECRET_NAME_VAR`] is unset.
pub const DEFAULT_SECRET_NAME: &str = "INT_SECRETS";

/// The fields this process cares about from the environment secret blob.
#[derive(Debug, Clone)]
pub struct Secrets {
    secret_name: String,
    api_base_url: Option<String>,
}

impl Secrets {
    /// Construct directly, bypassing the secret store. Intended for tests
    /// and local runs.
    pub fn new(secret_name: impl Into<String>, api_base_url: Option<String>) -> Self {
        Self {
            secret_name: secret_name.into(),
            api_base_url,
        }
    }

    /// Resolve the secret name from the environment, falling back to the
    /// fixed default.
    pub fn secret_name_from_env() -> String {
        std::env::var(SECRET_NAME_VAR)
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_SECRET_NAME.to_string())
    }

    /// Fetch the named secret and parse its JSON string payload.
    pub async fn load(client: &Client, secret_name: &str) -> Result<Self> {
        let output = client
            .get_secret_value()
            .secret_id(secret_name)
            .send()
            .await
            .map_err(|err| {
                error!(
                    secret = %secret_name,
                    error = %DisplayErrorContext(&err),
                    "failed to fetch secret"
                );
                Error::SecretUnavailable {
                    name: secret_name.to_string(),
                    message: format!("{}", DisplayErrorContext(&err)),
                }
            })?;

        let payload = output
            .secret_string()
            .ok_or_else(|| Error::SecretUnavailable {
                name: secret_name.to_string(),
                message: "secret has no string payload".to_string(),
            })?;

        let data: Value =
            serde_json::from_str(payload).map_err(|err| Error::SecretMalformed {
                name: secret_name.to_string(),
                message: err.to_string(),
            })?;

        let api_base_url = data
            .get("API_BASE_URL")
            .and_then(Value::as_str)
            .map(str::to_string);

        info!(secret = %secret_name, "secrets loaded");
        Ok(Self {
            secret_name: secret_name.to_string(),
            api_base_url,
        })
    }

    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }
}
