/// Errors raised by key-value store backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A PostgreSQL error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying the embedded schema migrations failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The HTTP request to a REST backend failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A REST backend returned a non-2xx status code.
    #[error("Store backend error ({status}): {body}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A value could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or unusable connection settings.
    #[error("Configuration error: {0}")]
    Config(String),
}
