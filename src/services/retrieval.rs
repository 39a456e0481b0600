//! Multi-query retrieval and prompt context assembly.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{Chunk, RetrievalConfig, RetrievalResult, ScoredChunk};

use super::ranker::Ranker;

/// Merges rankings for several phrasings of one question.
#[derive(Debug, Clone)]
pub struct Retriever {
    ranker: Ranker,
    config: RetrievalConfig,
}

impl Retriever {
    pub fn new(ranker: Ranker, config: &RetrievalConfig) -> Self {
        Self {
            ranker,
            config: config.clone(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Ranker::with_defaults(), &RetrievalConfig::default())
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// Rank every query, merge the selections and build the prompt context.
    pub fn retrieve(&self, chunks: &[Chunk], queries: &[String]) -> RetrievalResult {
        let selected = retrieve_for_queries(
            &self.ranker,
            chunks,
            queries,
            self.config.per_query_results,
            self.config.max_context_chunks,
        );

        RetrievalResult {
            queries: queries.to_vec(),
            context: build_context(&selected, &self.config.context_separator),
            citations: citations(&selected),
            chunks: selected,
        }
    }
}

/// Rank each query for `per_query` chunks, flatten in query order, keep the
/// first occurrence of each chunk index and stop at `max_total`.
pub fn retrieve_for_queries(
    ranker: &Ranker,
    chunks: &[Chunk],
    queries: &[String],
    per_query: usize,
    max_total: usize,
) -> Vec<ScoredChunk> {
    let mut seen = HashSet::new();
    let selected: Vec<ScoredChunk> = queries
        .iter()
        .flat_map(|query| ranker.find_relevant(chunks, query, per_query))
        .filter(|scored| seen.insert(scored.chunk_index()))
        .take(max_total)
        .collect();

    debug!(
        queries = queries.len(),
        selected = selected.len(),
        "merged query selections"
    );
    selected
}

/// Join selected chunk contents for the prompt builder.
pub fn build_context(selected: &[ScoredChunk], separator: &str) -> String {
    selected
        .iter()
        .map(ScoredChunk::content)
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn citations(selected: &[ScoredChunk]) -> Vec<u32> {
    selected.iter().map(ScoredChunk::chunk_index).collect()
}
