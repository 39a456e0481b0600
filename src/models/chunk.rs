//! Chunk records produced by the chunker and consumed by the ranker.

use serde::{Deserialize, Serialize};

/// How whitespace is canonicalized before paragraph splitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextNormalizationMode {
    /// Keep line breaks; every run of line breaks delimits a paragraph.
    #[default]
    PreserveParagraphs,
    /// Collapse all whitespace, line breaks included, into single spaces.
    /// The whole text becomes one paragraph and is split by word windows.
    CollapseAll,
}

impl std::str::FromStr for TextNormalizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "preserve_paragraphs" | "paragraphs" => Ok(Self::PreserveParagraphs),
            "collapse_all" | "collapse" => Ok(Self::CollapseAll),
            _ => Err(format!("unknown normalization mode: {}", s)),
        }
    }
}

impl std::fmt::Display for TextNormalizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreserveParagraphs => write!(f, "preserve_paragraphs"),
            Self::CollapseAll => write!(f, "collapse_all"),
        }
    }
}

/// A bounded segment of a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Text payload, never empty after trimming.
    pub content: String,

    /// Position in the document's chunk sequence, starting at 0.
    pub chunk_index: u32,

    /// Page of origin. Page boundaries are not tracked, so this is always 0.
    #[serde(default)]
    pub page_number: u32,
}

impl Chunk {
    pub fn new(content: String, chunk_index: u32) -> Self {
        Self {
            content,
            chunk_index,
            page_number: 0,
        }
    }

    /// Number of whitespace-separated words in the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// A chunk selected for a query, with its relevance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredChunk {
    #[serde(flatten)]
    pub chunk: Chunk,

    /// Final relevance score. `None` when the query had no usable keywords
    /// and the chunk was returned in document order without ranking.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<f64>,

    /// Score before length normalization and positional decay.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub raw_score: Option<f64>,

    /// Distinct query keywords present in the chunk.
    pub matched_word_count: usize,
}

impl ScoredChunk {
    pub fn unscored(chunk: Chunk) -> Self {
        Self {
            chunk,
            score: None,
            raw_score: None,
            matched_word_count: 0,
        }
    }

    pub fn chunk_index(&self) -> u32 {
        self.chunk.chunk_index
    }

    pub fn content(&self) -> &str {
        &self.chunk.content
    }
}
