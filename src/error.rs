//! Error types for version metadata rendering.

/// Library error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured rendering failed.
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;
