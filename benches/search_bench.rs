//! Benchmarks for the build pipeline and query evaluator.
//!
//! Simulates small and medium crawled corpora:
//! - small:  50 documents, ~200 words each
//! - medium: 200 documents, ~400 words each
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::tempdir;
use webdex::{run_build, Searcher};

const VOCAB: &[&str] = &[
    "search", "index", "query", "document", "token", "stem", "crawl", "webpage", "inverted",
    "posting", "duplicate", "hash", "rank", "score", "corpus", "engine", "parser", "html",
    "offset", "merge",
];

struct CorpusSize {
    name: &'static str,
    documents: usize,
    words_per_doc: usize,
}

const SIZES: &[CorpusSize] = &[
    CorpusSize {
        name: "small",
        documents: 50,
        words_per_doc: 200,
    },
    CorpusSize {
        name: "medium",
        documents: 200,
        words_per_doc: 400,
    },
];

fn synthetic_document(doc_index: usize, words: usize) -> String {
    let mut body = String::with_capacity(words * 7);
    for i in 0..words {
        let word = VOCAB[(doc_index * 31 + i) % VOCAB.len()];
        body.push_str(word);
        body.push(' ');
    }
    format!("<html><body><p>{body}</p></body></html>")
}

fn build_corpus(dir: &std::path::Path, size: &CorpusSize) {
    for i in 0..size.documents {
        let html = synthetic_document(i, size.words_per_doc);
        let json = serde_json::json!({
            "url": format!("https://bench.test/doc-{i}"),
            "content": html,
        });
        std::fs::write(
            dir.join(format!("doc-{i}.json")),
            serde_json::to_string(&json).unwrap(),
        )
        .unwrap();
    }
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size.name), size, |b, size| {
            b.iter(|| {
                let corpus = tempdir().unwrap();
                let output = tempdir().unwrap();
                build_corpus(corpus.path(), size);
                black_box(run_build(corpus.path(), output.path()).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    for size in SIZES {
        let corpus = tempdir().unwrap();
        let output = tempdir().unwrap();
        build_corpus(corpus.path(), size);
        run_build(corpus.path(), output.path()).unwrap();
        let searcher = Searcher::load(output.path()).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size.name), size, |b, _| {
            b.iter(|| black_box(searcher.search("search index query").unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_search);
criterion_main!(benches);
