//! Chunking and ranking throughput on a synthetic textbook-sized document.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use studydoc::services::{Ranker, TextChunker};

const TOPICS: &[&str] = &[
    "photosynthesis",
    "respiration",
    "mitochondria",
    "chloroplast",
    "enzyme",
    "membrane",
    "ribosome",
    "nucleus",
];

fn generate_document(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|p| {
            (0..40 + p % 120)
                .map(|w| match w % 9 {
                    0 => TOPICS[(p + w) % TOPICS.len()].to_string(),
                    _ => format!("filler{}", w % 50),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn criterion_benchmark(c: &mut Criterion) {
    let text = generate_document(2_000);
    let chunker = TextChunker::with_defaults();
    let chunks = chunker.chunk(&text);
    let ranker = Ranker::with_defaults();

    c.bench_function("chunk_200k_words", |b| {
        b.iter(|| chunker.chunk(black_box(&text)))
    });

    c.bench_function("rank_two_keywords", |b| {
        b.iter(|| ranker.find_relevant(black_box(&chunks), "mitochondria respiration", 3))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
