//! Error taxonomy for the build and query phases.
//!
//! Per the design: missing/malformed source documents, non-HTML content,
//! too-short documents, and duplicates are all soft drops logged via
//! `tracing::warn!` — they never become a `BuildError`. Only I/O failures
//! during spill or merge are fatal. Likewise an empty accepted-term set or
//! an unindexed query term is a normal `SearchResponse`, not a `QueryError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to write spill file: {0}")]
    Spill(#[source] std::io::Error),

    #[error("failed to read spill file during merge: {0}")]
    Merge(#[source] std::io::Error),

    #[error("failed to write sealed artifact: {0}")]
    Sidecar(#[source] std::io::Error),

    #[error("no documents were accepted from {0}")]
    EmptyCorpus(String),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("missing sealed artifact: {0}")]
    MissingArtifact(#[source] std::io::Error),

    #[error("corrupt offset map or URL map: {0}")]
    CorruptSidecar(#[source] serde_json::Error),

    #[error("failed to seek or read postings file: {0}")]
    PostingsRead(#[source] std::io::Error),

    #[error("offset map entry for {0:?} pointed at an unparseable record: {1}")]
    CorruptRecord(String, #[source] serde_json::Error),
}
