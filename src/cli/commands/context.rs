use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::cli::output::get_formatter;
use crate::models::{Config, OutputFormat};
use crate::services::{Ranker, Retriever};

use super::load_ready_document;

#[derive(Debug, Args)]
pub struct ContextArgs {
    #[arg(required = true, help = "Processed document JSON written by `chunk --output`")]
    pub chunks: PathBuf,

    #[arg(
        long = "query",
        short = 'q',
        required = true,
        help = "Query variant; repeat for each phrasing of the question"
    )]
    pub queries: Vec<String>,

    #[arg(long, help = "Chunks kept from each query variant")]
    pub per_query: Option<usize>,

    #[arg(long, short = 'n', help = "Chunks kept after merging all variants")]
    pub max: Option<usize>,
}

pub async fn handle_context(
    args: ContextArgs,
    format: OutputFormat,
    _verbose: bool,
) -> Result<()> {
    let config = Config::load()?.config;
    let formatter = get_formatter(format);

    let queries: Vec<String> = args
        .queries
        .iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();
    if queries.is_empty() {
        anyhow::bail!("at least one non-empty query is required");
    }

    let mut retrieval = config.retrieval.clone();
    if let Some(per_query) = args.per_query {
        retrieval.per_query_results = per_query;
    }
    if let Some(max) = args.max {
        retrieval.max_context_chunks = max;
    }
    retrieval.validate()?;

    let document = load_ready_document(&args.chunks)?;
    let retriever = Retriever::new(Ranker::new(&config.ranking)?, &retrieval);
    let result = retriever.retrieve(&document.chunks, &queries);

    print!("{}", formatter.format_retrieval(&result));

    Ok(())
}
