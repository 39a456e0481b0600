mod chunk;
mod config;
mod document;
mod search;

pub use chunk::{Chunk, ScoredChunk, TextNormalizationMode};
pub use config::{
    ChunkingConfig, Config, DEFAULT_MAX_RESULTS, DEFAULT_OVERLAP, DEFAULT_TARGET_SIZE,
    ENV_CHUNK_OVERLAP, ENV_CHUNK_SIZE, ENV_MAX_RESULTS, OutputConfig, RankingConfig,
    ResolvedConfig, RetrievalConfig,
};
pub use document::{DocumentStatus, ProcessedDocument};
pub use search::{OutputFormat, RetrievalResult, SearchResults};
