//! Indexer error type. The binary boundary converts it into `anyhow::Error`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The RPC answered with a JSON-RPC error that retrying will not fix.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The RPC answered, but without a usable `getEvents` result.
    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),
}

impl IndexerError {
    /// Whether the next poll may succeed without operator action.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Database(_) | Self::MalformedResponse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, IndexerError>;
