use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::cli::output::get_formatter;
use crate::models::{Config, OutputFormat, SearchResults};
use crate::services::Ranker;

use super::load_ready_document;

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(required = true, help = "Processed document JSON written by `chunk --output`")]
    pub chunks: PathBuf,

    #[arg(required = true, help = "Search query text")]
    pub query: String,

    #[arg(long, short = 'n', help = "Maximum number of chunks to return")]
    pub limit: Option<usize>,
}

pub async fn handle_search(args: SearchArgs, format: OutputFormat, _verbose: bool) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        anyhow::bail!("search query cannot be empty");
    }

    let config = Config::load()?.config;
    let formatter = get_formatter(format);
    let start_time = Instant::now();

    let limit = args.limit.unwrap_or(config.ranking.max_results);
    if limit == 0 {
        anyhow::bail!("limit must be at least 1");
    }

    let document = load_ready_document(&args.chunks)?;
    let ranker = Ranker::new(&config.ranking)?;
    let keywords = ranker.extract_keywords(query);

    debug!(document = %document.title, ?keywords, limit, "searching document");

    let results = ranker.find_relevant(&document.chunks, query, limit);
    let duration_ms = start_time.elapsed().as_millis() as u64;
    let search_results = SearchResults::new(
        query.to_string(),
        keywords,
        results,
        document.chunks.len(),
        duration_ms,
    );

    print!("{}", formatter.format_search_results(&search_results));

    Ok(())
}
