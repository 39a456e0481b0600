use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::cli::output::{ChunkStats, get_formatter};
use crate::models::{Config, DocumentStatus, OutputFormat, TextNormalizationMode};
use crate::services::{TextChunker, document_identity, process_in_background};
use crate::utils::{read_text_file, save_document};

#[derive(Debug, Args)]
pub struct ChunkArgs {
    #[arg(required = true, help = "Plain-text file with the extracted document text")]
    pub file: PathBuf,

    #[arg(long, short = 's', help = "Target chunk size in words")]
    pub size: Option<usize>,

    #[arg(long, short = 'o', help = "Words repeated between adjacent chunks")]
    pub overlap: Option<usize>,

    #[arg(long, help = "Treat the whole text as one paragraph")]
    pub collapse_all: bool,

    #[arg(long, help = "Write the processed document as JSON to this path")]
    pub output: Option<PathBuf>,
}

pub async fn handle_chunk(args: ChunkArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let config = Config::load()?.config;
    let formatter = get_formatter(format);
    let start_time = Instant::now();

    let mut chunking = config.chunking.clone();
    if let Some(size) = args.size {
        chunking.target_size = size;
    }
    if let Some(overlap) = args.overlap {
        chunking.overlap = overlap;
    }
    if args.collapse_all {
        chunking.normalization = TextNormalizationMode::CollapseAll;
    }

    let chunker = TextChunker::new(&chunking).context("invalid chunking parameters")?;
    let text = read_text_file(&args.file, chunking.max_file_size)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let (id, title) = document_identity(&args.file);

    debug!(
        file = %args.file.display(),
        target_size = chunker.target_size(),
        overlap = chunker.overlap(),
        mode = %chunker.mode(),
        "chunking document"
    );

    let document = process_in_background(id, title, text, chunker)
        .await
        .context("document processing task was cancelled")?;

    if document.status == DocumentStatus::Failed {
        anyhow::bail!(
            "failed to process {}: {}",
            args.file.display(),
            document.error.as_deref().unwrap_or("unknown error")
        );
    }

    if let Some(ref output) = args.output {
        save_document(output, &document)
            .with_context(|| format!("failed to write {}", output.display()))?;
    }

    let stats = ChunkStats {
        target_size: chunking.target_size,
        overlap: chunking.overlap,
        saved_to: args.output.clone(),
        duration_ms: start_time.elapsed().as_millis() as u64,
    };
    print!("{}", formatter.format_document(&document, &stats, verbose));

    Ok(())
}
