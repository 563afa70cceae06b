//! Document Reader: enumerate the corpus, apply the size gate, parse JSON.
//!
//! Soft-fails on anything that goes wrong with an individual file — a
//! missing file, malformed JSON, or a non-object record is logged and
//! skipped. Nothing here ever aborts the build; that's the merger/spiller's
//! job, not the reader's.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::types::{ReaderStats, MAX_FILE_SIZE, MIN_FILE_SIZE};

#[derive(Debug, Deserialize)]
struct SourceRecord {
    url: String,
    content: String,
}

/// A document that passed the size gate and parsed as valid JSON, ready for
/// extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub path: PathBuf,
    pub url: String,
    pub html: String,
}

/// Recursively enumerate `root`, apply the size gate, and parse survivors.
///
/// Files are read and parsed in parallel (the expensive, embarrassingly
/// parallel part), but the result is sorted by path first so that document
/// acceptance order — and therefore `doc_id` assignment downstream — is
/// deterministic across runs.
pub fn read_corpus(root: &Path, stats: &mut ReaderStats) -> Vec<RawDocument> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.file_name().and_then(|n| n.to_str()) != Some(".DS_Store"))
        .collect();
    paths.sort();

    let gated: Vec<PathBuf> = paths
        .into_iter()
        .filter(|path| match fs::metadata(path) {
            Ok(meta) => {
                let size = meta.len();
                if size < MIN_FILE_SIZE {
                    stats.small_files.push(path.display().to_string());
                    false
                } else if size > MAX_FILE_SIZE {
                    stats.large_files.push(path.display().to_string());
                    false
                } else {
                    true
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to stat file");
                false
            }
        })
        .collect();

    let docs: Vec<RawDocument> = gated
        .par_iter()
        .filter_map(|path| match load_one(path) {
            Ok(doc) => Some(doc),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable document");
                None
            }
        })
        .collect();

    stats.documents_processed = docs.len();
    docs
}

fn load_one(path: &Path) -> Result<RawDocument, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let record: SourceRecord = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    Ok(RawDocument {
        path: path.to_path_buf(),
        url: record.url,
        html: record.content,
    })
}
