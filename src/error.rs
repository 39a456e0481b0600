//! Error types for chunking, retrieval and document processing.

use thiserror::Error;

/// Errors related to chunker construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("target size must be greater than 0")]
    ZeroTargetSize,

    #[error("overlap ({overlap}) must be less than target size ({target_size})")]
    OverlapTooLarge { target_size: usize, overlap: usize },
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("path error: {0}")]
    PathError(String),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Errors related to reading, processing and storing documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("file exceeds maximum size: {size} > {max}")]
    TooLarge { size: u64, max: u64 },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("chunking error: {0}")]
    ChunkError(#[from] ChunkError),

    #[error("document is not ready: {0}")]
    NotReady(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_error_message() {
        let err = ChunkError::OverlapTooLarge {
            target_size: 10,
            overlap: 10,
        };
        assert_eq!(
            err.to_string(),
            "overlap (10) must be less than target size (10)"
        );
    }

    #[test]
    fn test_document_error_wraps_chunk_error() {
        let err = DocumentError::from(ChunkError::ZeroTargetSize);
        assert_eq!(
            err.to_string(),
            "chunking error: target size must be greater than 0"
        );
    }
}
