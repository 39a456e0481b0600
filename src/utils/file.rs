//! File utilities for loading source text and storing processed documents.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::DocumentError;
use crate::models::ProcessedDocument;

/// Calculate SHA-256 checksum of content.
pub fn calculate_checksum(content: &str) -> String {
    let hash = Sha256::digest(content.as_bytes());
    hex::encode(hash)
}

/// Read a UTF-8 text file, refusing files above `max_size` bytes.
pub fn read_text_file(path: &Path, max_size: u64) -> Result<String, DocumentError> {
    let metadata = fs::metadata(path)?;

    if metadata.len() > max_size {
        return Err(DocumentError::TooLarge {
            size: metadata.len(),
            max: max_size,
        });
    }

    Ok(fs::read_to_string(path)?)
}

/// Persist a processed document as pretty-printed JSON.
pub fn save_document(path: &Path, document: &ProcessedDocument) -> Result<(), DocumentError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_document(path: &Path) -> Result<ProcessedDocument, DocumentError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Chunk;

    #[test]
    fn test_calculate_checksum() {
        let checksum = calculate_checksum("hello world");
        assert_eq!(checksum.len(), 64);
        assert_eq!(checksum, calculate_checksum("hello world"));
        assert_ne!(checksum, calculate_checksum("hello world!"));
    }

    #[test]
    fn test_read_text_file_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "0123456789").unwrap();

        assert_eq!(read_text_file(&path, 10).unwrap(), "0123456789");
        assert!(matches!(
            read_text_file(&path, 5),
            Err(DocumentError::TooLarge { size: 10, max: 5 })
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_text_file(&dir.path().join("missing.txt"), 1024);
        assert!(matches!(result, Err(DocumentError::IoError(_))));
    }

    #[test]
    fn test_save_and_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("doc.json");
        let doc = ProcessedDocument::pending("id".into(), "Notes".into(), "sum".into())
            .mark_ready(3, vec![Chunk::new("alpha beta gamma".into(), 0)]);

        save_document(&path, &doc).unwrap();
        let loaded = load_document(&path).unwrap();

        assert_eq!(loaded.id, "id");
        assert!(loaded.is_ready());
        assert_eq!(loaded.chunks, doc.chunks);
    }
}
