//! Error types for the WRF-to-SUADA exporter.

use thiserror::Error;

/// Result type alias using NwpError.
pub type NwpResult<T> = Result<T, NwpError>;

/// Primary error type for snapshot reading, derivation and sinks.
#[derive(Debug, Error)]
pub enum NwpError {
    // === Snapshot errors ===
    #[error("Missing required variable: {0}")]
    MissingVariable(String),

    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    #[error("Invalid snapshot data: {0}")]
    InvalidSnapshot(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // === Derivation errors ===
    #[error("Grid index out of range: {0}")]
    IndexOutOfRange(String),

    #[error("Derivation failed for station '{station}': {message}")]
    Derivation { station: String, message: String },

    // === Sink errors ===
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    // === Configuration errors ===
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown source name: {0}")]
    UnknownSource(String),
}

impl NwpError {
    /// Whether the error aborts the whole run or only the current
    /// station/file (skip-and-continue).
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            NwpError::ConfigError(_) | NwpError::UnknownSource(_)
        )
    }
}

impl From<std::io::Error> for NwpError {
    fn from(err: std::io::Error) -> Self {
        NwpError::ExportError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(NwpError::ConfigError("missing env".into()).is_fatal());
        assert!(NwpError::UnknownSource("WRF_NMM".into()).is_fatal());
        assert!(!NwpError::MissingVariable("T2".into()).is_fatal());
        assert!(!NwpError::DatabaseError("upsert failed".into()).is_fatal());
    }
}
