//! Error taxonomy for the analytics engine.
//!
//! "Not enough data" is never an error here: projections and trends return
//! `None` or a neutral value instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or out-of-range input, rejected before any write.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single required row was missing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying persistence failure, propagated unchanged.
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// The entry write succeeded inside the transaction but the snapshot
    /// update did not; the whole write was rolled back.
    #[error("Snapshot update failed for client '{client_id}', entry write rolled back: {source}")]
    SnapshotSync {
        client_id: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A stored row could not be decoded.
    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Short machine-readable code used in the CLI error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::Store(_) | Self::SnapshotSync { .. } | Self::Corrupt(_) | Self::Io(_) => {
                "store_error"
            }
            Self::Serialization(_) => "general_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn validation(msg: impl Into<String>) -> Error {
    Error::Validation(msg.into())
}
