//! Paragraph-aware text chunking with word overlap.

use tracing::debug;

use crate::error::ChunkError;
use crate::models::{
    Chunk, ChunkingConfig, DEFAULT_OVERLAP, DEFAULT_TARGET_SIZE, TextNormalizationMode,
};
use crate::utils::{normalize_text, split_paragraphs, split_words};

/// Separator between paragraphs that share a chunk.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Text chunker that packs paragraphs into word-bounded, overlapping chunks.
///
/// Holds only its parameters, so one instance can chunk any number of
/// documents from any number of threads.
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Target chunk size in words
    target_size: usize,
    /// Words carried over from the previous chunk
    overlap: usize,
    mode: TextNormalizationMode,
}

impl TextChunker {
    /// Create a new text chunker with the given configuration.
    pub fn new(config: &ChunkingConfig) -> Result<Self, ChunkError> {
        Self::with_params(config.target_size, config.overlap)
            .map(|chunker| chunker.with_mode(config.normalization))
    }

    /// Create a chunker from explicit sizes, rejecting an overlap that would
    /// keep the word window from advancing.
    pub fn with_params(target_size: usize, overlap: usize) -> Result<Self, ChunkError> {
        if target_size == 0 {
            return Err(ChunkError::ZeroTargetSize);
        }
        if overlap >= target_size {
            return Err(ChunkError::OverlapTooLarge {
                target_size,
                overlap,
            });
        }
        Ok(Self {
            target_size,
            overlap,
            mode: TextNormalizationMode::default(),
        })
    }

    /// Create a chunker with default settings (500 words, 50 overlap).
    pub fn with_defaults() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            overlap: DEFAULT_OVERLAP,
            mode: TextNormalizationMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: TextNormalizationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn mode(&self) -> TextNormalizationMode {
        self.mode
    }

    /// Split text into chunks indexed from 0 in document order.
    ///
    /// Empty or whitespace-only text yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let normalized = normalize_text(text, self.mode);
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut sink = ChunkSink::default();
        self.pack_paragraphs(&normalized, &mut sink);

        // Safeguard only: non-empty normalized text always has a paragraph.
        if sink.is_empty() {
            debug!("no paragraph chunks produced, falling back to word windows");
            self.push_windows(&split_words(&normalized), &mut sink);
        }

        debug!(
            chunks = sink.len(),
            target_size = self.target_size,
            overlap = self.overlap,
            mode = %self.mode,
            "chunked text"
        );
        sink.into_chunks()
    }

    fn pack_paragraphs(&self, normalized: &str, sink: &mut ChunkSink) {
        let mut current: Vec<String> = Vec::new();
        let mut current_words = 0usize;

        for paragraph in split_paragraphs(normalized) {
            let words = split_words(paragraph);
            let paragraph_words = words.len();

            if paragraph_words > self.target_size {
                if !current.is_empty() {
                    sink.push(current.join(PARAGRAPH_SEPARATOR));
                    current.clear();
                    current_words = 0;
                }
                self.push_windows(&words, sink);
                continue;
            }

            if current_words + paragraph_words > self.target_size && !current.is_empty() {
                let closed = current.join(PARAGRAPH_SEPARATOR);
                let overlap_text = self.overlap_tail(&closed);
                let overlap_words = split_words(&overlap_text).len();
                sink.push(closed);

                current.clear();
                if !overlap_text.is_empty() {
                    current.push(overlap_text);
                }
                current.push(paragraph.to_string());
                current_words = overlap_words + paragraph_words;
            } else {
                current.push(paragraph.to_string());
                current_words += paragraph_words;
            }
        }

        if !current.is_empty() {
            sink.push(current.join(PARAGRAPH_SEPARATOR));
        }
    }

    /// Last `min(overlap, words)` words of a closed chunk, joined by spaces.
    fn overlap_tail(&self, closed: &str) -> String {
        let words = split_words(closed);
        let take = self.overlap.min(words.len());
        words[words.len() - take..].join(" ")
    }

    /// Slide a `target_size` window with stride `target_size - overlap` until
    /// the window reaches the last word.
    fn push_windows(&self, words: &[&str], sink: &mut ChunkSink) {
        if words.is_empty() {
            return;
        }

        let stride = self.target_size - self.overlap;
        let mut start = 0;
        loop {
            let end = (start + self.target_size).min(words.len());
            sink.push(words[start..end].join(" "));
            if end >= words.len() {
                break;
            }
            start += stride;
        }
    }
}

/// Chunk text with explicit sizes and the default normalization mode.
pub fn chunk_text(
    text: &str,
    target_size: usize,
    overlap: usize,
) -> Result<Vec<Chunk>, ChunkError> {
    Ok(TextChunker::with_params(target_size, overlap)?.chunk(text))
}

/// Hands out contiguous chunk indices.
#[derive(Default)]
struct ChunkSink {
    chunks: Vec<Chunk>,
}

impl ChunkSink {
    fn push(&mut self, content: String) {
        let index = self.chunks.len() as u32;
        self.chunks.push(Chunk::new(content, index));
    }

    fn len(&self) -> usize {
        self.chunks.len()
    }

    fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(prefix: &str, n: usize) -> String {
        (0..n)
            .map(|i| format!("{prefix}{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_small_text_single_chunk() {
        let chunker = TextChunker::with_defaults();
        let chunks = chunker.chunk("Hello, world!");

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Hello, world!");
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].page_number, 0);
    }

    #[test]
    fn test_empty_text() {
        let chunker = TextChunker::with_defaults();
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("   ").is_empty());
        assert!(chunker.chunk("\n\r\n\t").is_empty());
    }

    #[test]
    fn test_rejects_invalid_params() {
        assert_eq!(
            TextChunker::with_params(0, 0).unwrap_err(),
            ChunkError::ZeroTargetSize
        );
        assert_eq!(
            TextChunker::with_params(10, 10).unwrap_err(),
            ChunkError::OverlapTooLarge {
                target_size: 10,
                overlap: 10
            }
        );
        assert!(chunk_text("text", 10, 11).is_err());
        assert!(TextChunker::with_params(10, 9).is_ok());
    }

    #[test]
    fn test_paragraphs_joined_with_blank_line() {
        let chunker = TextChunker::with_params(10, 2).unwrap();
        let chunks = chunker.chunk("alpha beta\n\n\ngamma delta\nepsilon");

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "alpha beta\n\ngamma delta\n\nepsilon");
    }

    #[test]
    fn test_overflow_seeds_next_chunk_with_overlap() {
        let chunker = TextChunker::with_params(10, 3).unwrap();
        let text = format!("{}\n{}", words("a", 8), words("b", 5));
        let chunks = chunker.chunk(&text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, words("a", 8));
        assert_eq!(chunks[1].content, format!("a5 a6 a7\n\n{}", words("b", 5)));
    }

    #[test]
    fn test_overlap_shorter_than_closed_chunk() {
        let chunker = TextChunker::with_params(4, 3).unwrap();
        let chunks = chunker.chunk("one two\nthree four five");

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "one two");
        assert_eq!(chunks[1].content, "one two\n\nthree four five");
    }

    #[test]
    fn test_zero_overlap_has_no_prefix() {
        let chunker = TextChunker::with_params(5, 0).unwrap();
        let chunks = chunker.chunk("one two three\nfour five six");

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].content, "four five six");
    }

    #[test]
    fn test_oversized_paragraph_uses_word_windows() {
        let chunker = TextChunker::with_params(10, 2).unwrap();
        let text = format!("intro words\n{}\noutro", words("w", 25));
        let chunks = chunker.chunk(&text);

        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents[0], "intro words");
        assert_eq!(contents[1], words("w", 10));
        assert!(contents[2].starts_with("w8 w9 w10"));
        assert!(contents[3].starts_with("w16 w17"));
        assert!(contents[3].ends_with("w24"));
        assert_eq!(*contents.last().unwrap(), "outro");
        assert_eq!(chunks.len(), 5);
    }

    #[test]
    fn test_window_stops_when_end_is_covered() {
        let chunker = TextChunker::with_params(5, 1).unwrap();
        let chunks = chunker.chunk(&words("x", 9));

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "x0 x1 x2 x3 x4");
        assert_eq!(chunks[1].content, "x4 x5 x6 x7 x8");
    }

    #[test]
    fn test_collapse_all_ignores_line_breaks() {
        let chunker = TextChunker::with_params(4, 1)
            .unwrap()
            .with_mode(TextNormalizationMode::CollapseAll);
        let chunks = chunker.chunk("a b\nc d\ne f");

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "a b c d");
        assert_eq!(chunks[1].content, "d e f");
    }

    #[test]
    fn test_preserve_paragraphs_splits_on_single_line_break() {
        let chunker = TextChunker::with_params(4, 1).unwrap();
        let chunks = chunker.chunk("a b\nc d\ne f");

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "a b\n\nc d");
        assert_eq!(chunks[1].content, "d\n\ne f");
    }

    #[test]
    fn test_indices_are_contiguous() {
        let chunker = TextChunker::with_params(7, 2).unwrap();
        let text = (0..12)
            .map(|i| words(&format!("p{i}_"), 3 + i % 5))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunks = chunker.chunk(&text);

        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i as u32);
        }
    }

    #[test]
    fn test_new_applies_config_mode() {
        let config =
            ChunkingConfig::new(20, 5).with_normalization(TextNormalizationMode::CollapseAll);
        let chunker = TextChunker::new(&config).unwrap();
        assert_eq!(chunker.target_size(), 20);
        assert_eq!(chunker.overlap(), 5);
        assert_eq!(chunker.mode(), TextNormalizationMode::CollapseAll);
    }
}
