pub mod cli;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use cli::{Cli, Commands};
pub use error::{ChunkError, ConfigError, DocumentError};
pub use models::{Chunk, Config, OutputFormat, ScoredChunk, TextNormalizationMode};
pub use services::{Ranker, TextChunker, chunk_text, find_relevant};
