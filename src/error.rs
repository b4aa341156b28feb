//! Error types for verite-core.

use thiserror::Error;

/// Result type alias using verite-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during verification operations.
///
/// The pipeline never surfaces these to callers: a retrieval failure
/// downgrades the affected segments to unresolved and `check` still
/// returns a [`crate::types::CheckResult`]. The variants exist for the
/// collaborator seam ([`crate::retrieval::KnowledgeStore`]).
#[derive(Error, Debug)]
pub enum Error {
    /// Knowledge retrieval collaborator failed or was cancelled
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a retrieval error.
    pub fn retrieval(message: impl Into<String>) -> Self {
        Self::Retrieval(message.into())
    }
}
