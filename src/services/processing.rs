//! Document processing: extracted text in, chunked document out.

use std::path::Path;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::DocumentError;
use crate::models::{ChunkingConfig, ProcessedDocument};
use crate::utils::{calculate_checksum, read_text_file, word_count};

use super::chunker::TextChunker;

/// Chunk extracted text and mark the document ready.
pub fn process_text(
    id: &str,
    title: &str,
    text: &str,
    chunker: &TextChunker,
) -> ProcessedDocument {
    let pending =
        ProcessedDocument::pending(id.to_string(), title.to_string(), calculate_checksum(text));
    complete(pending, text, chunker)
}

/// Chunk a document on the blocking pool. The returned handle resolves to a
/// `Ready` document, or a `Failed` one if the worker did not finish.
pub fn process_in_background(
    id: String,
    title: String,
    text: String,
    chunker: TextChunker,
) -> JoinHandle<ProcessedDocument> {
    tokio::spawn(async move {
        let checksum = calculate_checksum(&text);
        let pending = ProcessedDocument::pending(id, title, checksum);
        info!(document = %pending.id, status = %pending.status, "processing document");

        let fallback = pending.clone();
        let worker = tokio::task::spawn_blocking(move || complete(pending, &text, &chunker));
        match worker.await {
            Ok(document) => document,
            Err(e) => {
                warn!(document = %fallback.id, error = %e, "document processing failed");
                fallback.mark_failed(e.to_string())
            }
        }
    })
}

fn complete(pending: ProcessedDocument, text: &str, chunker: &TextChunker) -> ProcessedDocument {
    let chunks = chunker.chunk(text);

    if chunks.is_empty() {
        warn!(document = %pending.id, "document has no text to chunk");
    }
    info!(document = %pending.id, chunks = chunks.len(), "document processed");

    pending.mark_ready(word_count(text), chunks)
}

/// Read a text file and chunk it with the given configuration.
pub fn process_file(
    path: &Path,
    config: &ChunkingConfig,
) -> Result<ProcessedDocument, DocumentError> {
    let chunker = TextChunker::new(config)?;
    let text = read_text_file(path, config.max_file_size)?;
    let (id, title) = document_identity(path);
    Ok(process_text(&id, &title, &text, &chunker))
}

/// Stable document id and display title for a source path.
pub fn document_identity(path: &Path) -> (String, String) {
    let location = path
        .canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string();
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| location.clone());
    (ProcessedDocument::generate_id(&location), title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentStatus;

    #[test]
    fn test_process_text_marks_ready() {
        let chunker = TextChunker::with_params(5, 1).unwrap();
        let doc = process_text("doc-1", "Notes", "one two three\nfour five six", &chunker);

        assert_eq!(doc.status, DocumentStatus::Ready);
        assert_eq!(doc.total_words, 6);
        assert_eq!(doc.chunks.len(), 2);
        assert_eq!(doc.checksum.len(), 64);
        assert!(doc.error.is_none());
    }

    #[test]
    fn test_process_empty_text_is_ready_without_chunks() {
        let doc = process_text("doc-2", "Empty", "   ", &TextChunker::with_defaults());
        assert!(doc.is_ready());
        assert!(doc.chunks.is_empty());
    }

    #[tokio::test]
    async fn test_process_in_background() {
        let handle = process_in_background(
            "doc-3".to_string(),
            "Background".to_string(),
            "alpha beta gamma".to_string(),
            TextChunker::with_defaults(),
        );
        let doc = handle.await.unwrap();

        assert_eq!(doc.id, "doc-3");
        assert_eq!(doc.title, "Background");
        assert_eq!(doc.checksum, calculate_checksum("alpha beta gamma"));
        assert!(doc.is_ready());
        assert_eq!(doc.chunks[0].content, "alpha beta gamma");
    }

    #[test]
    fn test_process_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biology.txt");
        std::fs::write(&path, "Cells are the unit of life.\n\nDNA stores information.").unwrap();

        let doc = process_file(&path, &ChunkingConfig::default()).unwrap();
        assert_eq!(doc.title, "biology");
        assert_eq!(doc.id.len(), 32);
        assert_eq!(doc.chunks.len(), 1);
        assert_eq!(
            doc.chunks[0].content,
            "Cells are the unit of life.\n\nDNA stores information."
        );
    }

    #[test]
    fn test_process_file_rejects_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "text").unwrap();

        let result = process_file(&path, &ChunkingConfig::new(10, 10));
        assert!(matches!(result, Err(DocumentError::ChunkError(_))));
    }
}
