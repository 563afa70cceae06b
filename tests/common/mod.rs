//! Shared fixtures for building small test corpora end to end.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use webdex::{run_build, BuildSummary};

/// Write one crawled-document JSON file: a single `<p>` containing `words`
/// repeated `repeats` times, wrapped in a minimal HTML shell.
pub fn write_doc(dir: &Path, name: &str, url: &str, words: &str, repeats: usize) {
    let body: String = (0..repeats).map(|_| format!("{words} ")).collect();
    let html = format!("<html><body><p>{body}</p></body></html>");
    let json = serde_json::json!({ "url": url, "content": html });
    fs::write(dir.join(name), serde_json::to_string(&json).unwrap()).unwrap();
}

/// A corpus directory and the index directory it was built into.
pub struct Fixture {
    pub corpus: TempDir,
    pub index: TempDir,
    pub summary: BuildSummary,
}

/// Build a sealed index from a list of `(filename, url, words, repeats)`
/// document specs.
pub fn build_fixture(docs: &[(&str, &str, &str, usize)]) -> Fixture {
    let corpus = tempfile::tempdir().unwrap();
    let index = tempfile::tempdir().unwrap();
    for (name, url, words, repeats) in docs {
        write_doc(corpus.path(), name, url, words, *repeats);
    }
    let summary = run_build(corpus.path(), index.path()).unwrap();
    Fixture { corpus, index, summary }
}
