//! Keyword relevance ranking over a document's chunks.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::error::ConfigError;
use crate::models::{Chunk, RankingConfig, ScoredChunk};
use crate::utils::{count_whole_word, word_count};

/// Built-in stop words (English and Portuguese).
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    // English
    "the", "is", "at", "which", "on", "a", "an", "and", "or", "but", "in", "with", "to", "for",
    "of", "as", "by", "this", "that", "it", "are", "was", "were", "been", "be", "have", "has",
    "had", "do", "does", "did", "will", "would", "could", "should", "may", "might",
    // Portuguese
    "o", "os", "as", "um", "uma", "uns", "umas", "de", "da", "do", "das", "dos", "em", "no",
    "na", "nos", "nas", "por", "para", "com", "sem", "sob", "sobre", "e", "ou", "mas", "pois",
    "que", "como", "quando", "onde", "é", "são", "foi", "era", "ser", "estar", "ter", "haver",
    "isso", "este", "esse", "aquele", "esta", "essa", "aquela", "seu", "sua", "seus", "suas",
    "meu", "minha", "meus", "minhas",
];

/// Scores chunks against a query by whole-word keyword hits.
///
/// The ranker owns only its weights and stop words; ranking never mutates it.
#[derive(Debug, Clone)]
pub struct Ranker {
    config: RankingConfig,
    stop_words: HashSet<String>,
}

impl Ranker {
    /// Build a ranker, rejecting weights or a position decay that could zero
    /// out or invert a matching chunk's score.
    pub fn new(config: &RankingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    pub fn with_defaults() -> Self {
        Self::build(&RankingConfig::default())
    }

    fn build(config: &RankingConfig) -> Self {
        let stop_words = DEFAULT_STOP_WORDS
            .iter()
            .map(|w| (*w).to_string())
            .chain(config.extra_stop_words.iter().map(|w| w.to_lowercase()))
            .collect();
        Self {
            config: config.clone(),
            stop_words,
        }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Lowercased, de-duplicated query keywords in query order.
    ///
    /// Leading and trailing punctuation is stripped from each token; tokens
    /// shorter than `min_keyword_chars` and stop words are dropped.
    pub fn extract_keywords(&self, query: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        query
            .to_lowercase()
            .split_whitespace()
            .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|token| token.chars().count() >= self.config.min_keyword_chars)
            .filter(|token| !self.is_stop_word(token))
            .filter(|token| seen.insert(token.to_string()))
            .map(str::to_string)
            .collect()
    }

    /// Return up to `max_results` chunks most relevant to `query`, best first.
    ///
    /// A query with no usable keywords returns the first `max_results`
    /// chunks unscored, in their given order. Chunks that match nothing are
    /// never returned.
    pub fn find_relevant(
        &self,
        chunks: &[Chunk],
        query: &str,
        max_results: usize,
    ) -> Vec<ScoredChunk> {
        if chunks.is_empty() || query.trim().is_empty() || max_results == 0 {
            return Vec::new();
        }

        let keywords = self.extract_keywords(query);
        if keywords.is_empty() {
            debug!(query, "no keywords left after filtering, returning leading chunks");
            return chunks
                .iter()
                .take(max_results)
                .cloned()
                .map(ScoredChunk::unscored)
                .collect();
        }

        debug!(?keywords, chunks = chunks.len(), "ranking chunks");

        let total = chunks.len();
        let mut scored: Vec<ScoredChunk> = chunks
            .iter()
            .enumerate()
            .map(|(position, chunk)| self.score_chunk(chunk, position, total, &keywords))
            .filter(|scored| scored.score.is_some_and(|s| s > 0.0))
            .collect();

        scored.sort_by(compare_ranked);
        scored.truncate(max_results);
        scored
    }

    fn score_chunk(
        &self,
        chunk: &Chunk,
        position: usize,
        total: usize,
        keywords: &[String],
    ) -> ScoredChunk {
        let content = chunk.content.to_lowercase();

        let occurrences: usize = keywords
            .iter()
            .map(|keyword| count_whole_word(&content, keyword))
            .sum();
        let mut raw_score = occurrences as f64 * self.config.occurrence_weight;

        let matched = keywords
            .iter()
            .filter(|keyword| content.contains(keyword.as_str()))
            .count();
        if matched > 1 {
            raw_score += matched as f64 * self.config.coverage_weight;
        }

        let words = word_count(&chunk.content).max(1) as f64;
        let normalized = raw_score / words.sqrt();
        let position_factor = 1.0 - (position as f64 / total as f64) * self.config.position_decay;

        ScoredChunk {
            chunk: chunk.clone(),
            score: Some(normalized * position_factor),
            raw_score: Some(raw_score),
            matched_word_count: matched,
        }
    }
}

/// Score descending, then matched keywords descending, then chunk index ascending.
fn compare_ranked(a: &ScoredChunk, b: &ScoredChunk) -> Ordering {
    let score_a = a.score.unwrap_or(0.0);
    let score_b = b.score.unwrap_or(0.0);
    score_b
        .total_cmp(&score_a)
        .then_with(|| b.matched_word_count.cmp(&a.matched_word_count))
        .then_with(|| a.chunk.chunk_index.cmp(&b.chunk.chunk_index))
}

/// Rank chunks with the default weights and stop words.
pub fn find_relevant(chunks: &[Chunk], query: &str, max_results: usize) -> Vec<ScoredChunk> {
    Ranker::with_defaults().find_relevant(chunks, query, max_results)
}
