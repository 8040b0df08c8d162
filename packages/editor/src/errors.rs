//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported session schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u64, expected: u64 },

    #[error("Persisted session is missing a schema version")]
    MissingVersion,

    #[error("Persisted session has no pages")]
    EmptySession,

    #[error("Persisted current page {index} is out of range for {len} pages")]
    CurrentIndexOutOfRange { index: usize, len: usize },

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),
}
