//! Error types for the evaluation toolkit.
//!
//! These cover export-side failures only. Regulatory findings are returned
//! as [`crate::validation::ValidationResult`] values and are never `Err`.

/// Result type alias for evaluation toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering an evaluation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested font is not registered with the renderer
    #[error("Font not available: {0}")]
    Font(String),

    /// DOCX packaging failure (archive or XML serialization)
    #[error("Document packaging error: {0}")]
    Package(String),

    /// Record could not be decoded from its serialized form
    #[error("Invalid evaluation record: {0}")]
    InvalidRecord(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
