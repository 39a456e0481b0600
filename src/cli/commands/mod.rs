mod chunk;
mod config;
mod context;
mod search;

pub use chunk::ChunkArgs;
pub use config::ConfigCommand;
pub use context::ContextArgs;
pub use search::SearchArgs;

pub use chunk::handle_chunk;
pub use config::handle_config;
pub use context::handle_context;
pub use search::handle_search;

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::DocumentError;
use crate::models::ProcessedDocument;
use crate::utils::load_document;

/// Load a saved document and make sure it finished processing.
fn load_ready_document(path: &Path) -> Result<ProcessedDocument> {
    let document = load_document(path)
        .with_context(|| format!("failed to load chunks from {}", path.display()))?;
    if !document.is_ready() {
        return Err(DocumentError::NotReady(format!(
            "{} is {}",
            document.title, document.status
        ))
        .into());
    }
    Ok(document)
}
