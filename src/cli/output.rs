use std::fmt::Write as FmtWrite;
use std::path::PathBuf;

use serde::Serialize;

use crate::models::{
    OutputFormat, ProcessedDocument, RetrievalResult, ScoredChunk, SearchResults,
};

const PREVIEW_CHARS: usize = 200;

pub trait Formatter {
    fn format_document(
        &self,
        document: &ProcessedDocument,
        stats: &ChunkStats,
        verbose: bool,
    ) -> String;
    fn format_search_results(&self, results: &SearchResults) -> String;
    fn format_retrieval(&self, result: &RetrievalResult) -> String;
    fn format_message(&self, message: &str) -> String;
}

#[derive(Debug, Clone, Default)]
pub struct ChunkStats {
    pub target_size: usize,
    pub overlap: usize,
    pub saved_to: Option<PathBuf>,
    pub duration_ms: u64,
}

fn preview(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let head: String = flat.chars().take(PREVIEW_CHARS).collect();
    if flat.chars().count() > PREVIEW_CHARS {
        format!("{}...", head)
    } else {
        head
    }
}

fn score_label(result: &ScoredChunk) -> String {
    match result.score {
        Some(score) => format!("{:.3}", score),
        None => "unscored".to_string(),
    }
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_document(
        &self,
        document: &ProcessedDocument,
        stats: &ChunkStats,
        verbose: bool,
    ) -> String {
        let mut output = String::new();
        writeln!(output, "Document: {} [{}]", document.title, document.status).unwrap();
        writeln!(output, "  ID:       {}", document.id).unwrap();
        writeln!(output, "  Words:    {}", document.total_words).unwrap();
        writeln!(
            output,
            "  Chunks:   {} (target {} words, overlap {})",
            document.chunks.len(),
            stats.target_size,
            stats.overlap
        )
        .unwrap();
        writeln!(output, "  Time:     {}ms", stats.duration_ms).unwrap();
        if let Some(ref path) = stats.saved_to {
            writeln!(output, "  Saved to: {}", path.display()).unwrap();
        }

        if verbose {
            writeln!(output).unwrap();
            for chunk in &document.chunks {
                writeln!(
                    output,
                    "#{} ({} words)",
                    chunk.chunk_index,
                    chunk.word_count()
                )
                .unwrap();
                writeln!(output, "   {}", preview(&chunk.content)).unwrap();
            }
        }

        output
    }

    fn format_search_results(&self, results: &SearchResults) -> String {
        if results.is_empty() {
            return format!("No results found for: {}\n", results.query);
        }

        let mut output = String::new();
        writeln!(output, "Search results for: \"{}\"", results.query).unwrap();
        if !results.keywords.is_empty() {
            writeln!(output, "Keywords: {}", results.keywords.join(", ")).unwrap();
        }
        writeln!(
            output,
            "Found {} of {} chunks in {}ms\n",
            results.len(),
            results.total_chunks,
            results.duration_ms
        )
        .unwrap();

        for (i, result) in results.results.iter().enumerate() {
            writeln!(
                output,
                "{}. [Score: {}] chunk #{} ({} keywords)",
                i + 1,
                score_label(result),
                result.chunk_index(),
                result.matched_word_count
            )
            .unwrap();
            writeln!(output, "   ---").unwrap();
            writeln!(output, "   {}", preview(result.content())).unwrap();
            writeln!(output).unwrap();
        }

        output
    }

    fn format_retrieval(&self, result: &RetrievalResult) -> String {
        if result.is_empty() {
            return format!("No relevant chunks for: {}\n", result.queries.join(" | "));
        }

        let mut output = String::new();
        writeln!(output, "Queries:").unwrap();
        for query in &result.queries {
            writeln!(output, "  - {}", query).unwrap();
        }
        let cited: Vec<String> = result.citations.iter().map(|c| format!("#{c}")).collect();
        writeln!(output, "Citations: {}\n", cited.join(", ")).unwrap();
        writeln!(output, "{}", result.context).unwrap();
        output
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}

pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize>(&self, value: &T) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        let mut output = rendered
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string());
        output.push('\n');
        output
    }
}

impl Formatter for JsonFormatter {
    fn format_document(
        &self,
        document: &ProcessedDocument,
        stats: &ChunkStats,
        _verbose: bool,
    ) -> String {
        let json = serde_json::json!({
            "document": document,
            "target_size": stats.target_size,
            "overlap": stats.overlap,
            "saved_to": stats.saved_to,
            "duration_ms": stats.duration_ms,
        });
        self.render(&json)
    }

    fn format_search_results(&self, results: &SearchResults) -> String {
        self.render(results)
    }

    fn format_retrieval(&self, result: &RetrievalResult) -> String {
        self.render(result)
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({"message": message}).to_string()
    }
}

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format_document(
        &self,
        document: &ProcessedDocument,
        stats: &ChunkStats,
        verbose: bool,
    ) -> String {
        let mut output = String::new();
        writeln!(output, "## {}\n", document.title).unwrap();
        writeln!(output, "- **Status:** {}", document.status).unwrap();
        writeln!(output, "- **Words:** {}", document.total_words).unwrap();
        writeln!(
            output,
            "- **Chunks:** {} (target {} words, overlap {})",
            document.chunks.len(),
            stats.target_size,
            stats.overlap
        )
        .unwrap();
        if let Some(ref path) = stats.saved_to {
            writeln!(output, "- **Saved to:** `{}`", path.display()).unwrap();
        }
        writeln!(output).unwrap();

        if verbose {
            for chunk in &document.chunks {
                writeln!(output, "### Chunk {}\n", chunk.chunk_index).unwrap();
                writeln!(output, "```").unwrap();
                writeln!(output, "{}", chunk.content).unwrap();
                writeln!(output, "```\n").unwrap();
            }
        }

        output
    }

    fn format_search_results(&self, results: &SearchResults) -> String {
        if results.is_empty() {
            return format!("## No results found\n\nQuery: `{}`\n", results.query);
        }

        let mut output = String::new();
        writeln!(output, "## Search Results\n").unwrap();
        writeln!(output, "**Query:** `{}`\n", results.query).unwrap();
        writeln!(
            output,
            "Found {} of {} chunks in {}ms\n",
            results.len(),
            results.total_chunks,
            results.duration_ms
        )
        .unwrap();

        for (i, result) in results.results.iter().enumerate() {
            writeln!(
                output,
                "### {}. Chunk {} (score {})\n",
                i + 1,
                result.chunk_index(),
                score_label(result)
            )
            .unwrap();
            writeln!(output, "```").unwrap();
            writeln!(output, "{}", result.content()).unwrap();
            writeln!(output, "```\n").unwrap();
        }

        output
    }

    fn format_retrieval(&self, result: &RetrievalResult) -> String {
        let mut output = String::new();
        writeln!(output, "## Context\n").unwrap();
        for query in &result.queries {
            writeln!(output, "- `{}`", query).unwrap();
        }
        writeln!(output).unwrap();

        if result.is_empty() {
            writeln!(output, "_No relevant chunks._").unwrap();
            return output;
        }

        let cited: Vec<String> = result.citations.iter().map(|c| format!("`#{c}`")).collect();
        writeln!(output, "**Citations:** {}\n", cited.join(", ")).unwrap();
        for chunk in &result.chunks {
            writeln!(output, "> **Chunk {}**\n", chunk.chunk_index()).unwrap();
            for line in chunk.content().lines() {
                writeln!(output, "> {}", line).unwrap();
            }
            writeln!(output).unwrap();
        }
        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("> {}", message)
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Chunk;

    fn sample_results() -> SearchResults {
        let scored = ScoredChunk {
            chunk: Chunk::new("Entropy measures disorder.".to_string(), 4),
            score: Some(1.25),
            raw_score: Some(3.0),
            matched_word_count: 1,
        };
        SearchResults::new(
            "entropy".to_string(),
            vec!["entropy".to_string()],
            vec![scored],
            10,
            2,
        )
    }

    #[test]
    fn test_text_search_results() {
        let output = TextFormatter.format_search_results(&sample_results());
        assert!(output.contains("Search results for: \"entropy\""));
        assert!(output.contains("[Score: 1.250] chunk #4"));
        assert!(output.contains("Entropy measures disorder."));
    }

    #[test]
    fn test_text_empty_results() {
        let empty = SearchResults::new("nothing".to_string(), vec![], vec![], 3, 0);
        assert_eq!(
            TextFormatter.format_search_results(&empty),
            "No results found for: nothing\n"
        );
    }

    #[test]
    fn test_json_search_results_parse() {
        let output = JsonFormatter::new(false).format_search_results(&sample_results());
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["results"][0]["chunkIndex"], 4);
        assert_eq!(value["results"][0]["score"], 1.25);
    }

    #[test]
    fn test_markdown_retrieval() {
        let result = RetrievalResult {
            queries: vec!["entropy".to_string()],
            chunks: sample_results().results,
            context: "Entropy measures disorder.".to_string(),
            citations: vec![4],
        };
        let output = MarkdownFormatter.format_retrieval(&result);
        assert!(output.contains("**Citations:** `#4`"));
        assert!(output.contains("> Entropy measures disorder."));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "word ".repeat(100);
        let short = preview(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), PREVIEW_CHARS + 3);
    }
}
