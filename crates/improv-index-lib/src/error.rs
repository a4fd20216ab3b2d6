use thiserror::Error;

/// Convenient result alias for the Improv Index library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No table name was supplied and none is set in the environment.
    #[error(
        "table name must be provided or set in the {} environment variable",
        crate::table::TABLE_NAME_VAR
    )]
    MissingTableName,

    /// Inbound request body was present but not valid JSON.
    #[error("invalid JSON in request body: {message}")]
    MalformedRequestBody { message: String },

    /// A DynamoDB call failed. Carries the operation and table for logging;
    /// the underlying SDK detail is in `message` and must never reach callers.
    #[error("{operation} failed on table {table}: {message}")]
    TableOperation {
        operation: &'static str,
        table: String,
        message: String,
    },

    /// A table item could not be converted to or from the requested type.
    #[error("item conversion failed for table {table}: {message}")]
    ItemConversion { table: String, message: String },

    /// The secret store call failed or returned no string payload.
    #[error("secret {name} unavailable: {message}")]
    SecretUnavailable { name: String, message: String },

    /// The secret payload was returned but is not valid JSON.
    #[error("secret {name} is not valid JSON: {message}")]
    SecretMalformed { name: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_table_name_names_the_env_var() {
        let err = Error::MissingTableName;
        assert!(err.to_string().contains("DYNAMODB_TABLE_NAME"));
    }

    #[test]
    fn table_operation_names_operation_and_table() {
        let err = Error::TableOperation {
            operation: "scan",
            table: "activities".to_string(),
            message: "throttled".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("scan"));
        assert!(rendered.contains("activities"));
    }
}
