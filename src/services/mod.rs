mod chunker;
mod processing;
mod ranker;
mod retrieval;

pub use chunker::{PARAGRAPH_SEPARATOR, TextChunker, chunk_text};
pub use processing::{document_identity, process_file, process_in_background, process_text};
pub use ranker::{DEFAULT_STOP_WORDS, Ranker, find_relevant};
pub use retrieval::{Retriever, build_context, citations, retrieve_for_queries};
