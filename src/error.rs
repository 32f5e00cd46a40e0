//! Error types for analysis operations.

use thiserror::Error;

/// Errors that can occur while resolving or assembling a manifest.
///
/// Unresolved references are not errors; they are reported as data in
/// [`Invocations`](crate::hir::Invocations).
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The file is not part of the analyzed source set.
    #[error("Unknown file: {0}")]
    UnknownFile(String),

    /// The symbol id does not belong to the namespace tree.
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// JSON serialization error.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Create an unknown-file error.
    pub fn unknown_file(path: impl Into<String>) -> Self {
        Self::UnknownFile(path.into())
    }
}

/// Result alias used across the crate.
pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
