//! The building blocks of the index: documents, tokens, and postings.
//!
//! # Invariants
//!
//! - `Posting.raw_freq >= 1`.
//! - `tf_idf == round_half_to_even(raw_freq as f64 / doc_length * (n_docs / df).ln(), 5)`.
//! - `doc_id` is dense starting at 1, assigned in document-acceptance order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimum byte size for a source document to be considered (strict `<` rejects).
pub const MIN_FILE_SIZE: u64 = 1000;
/// Maximum byte size for a source document to be considered (strict `>` rejects).
pub const MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;
/// Minimum number of (boosted) tokens a document must contain to be indexed.
pub const MIN_TOKENS_PER_DOC: usize = 100;
/// Minimum token length after splitting on non-alphanumeric runs.
pub const MIN_TOKEN_LENGTH: usize = 2;
/// Width of the SimHash fingerprint.
pub const SIMHASH_BITS: usize = 16;
/// Hamming radius at which two fingerprints are considered near-duplicates.
pub const NEAR_DUPLICATE_HAMMING_RADIUS: u32 = 1;
/// Distinct-token count at which a partial index spills to disk.
pub const PARTIAL_THRESHOLD: usize = 90_000;
/// Maximum number of URLs returned from a query.
pub const RESULT_LIMIT: usize = 5;

/// A document identifier. Dense, starts at 1, assigned only to accepted
/// documents, in acceptance order.
///
/// A thin newtype around `u32`, following the teacher's `DocId`/`CharOffset`
/// pattern: it stops a `raw_freq` or a byte offset from being passed where a
/// `doc_id` is expected. Unlike the teacher's `DocId::new`, which validates
/// against a known `num_docs` (the teacher indexes a fixed, already-loaded
/// document slice), construction here has no upper bound to check against —
/// `doc_id`s are handed out one at a time as documents stream in during the
/// build, so `new` just wraps the counter value; density is an invariant of
/// the `Builder`, not of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    #[inline]
    pub fn new(id: u32) -> Self {
        DocId(id)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// The next dense id after this one.
    #[inline]
    pub fn next(self) -> Self {
        DocId(self.0 + 1)
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stemmed token: the index's key space.
pub type Stem = String;

/// One `(doc_id, raw_freq)` pair as written by the partial-index builder,
/// before tf-idf weights are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPosting {
    pub doc_id: DocId,
    pub raw_freq: u32,
}

/// A fully-scored posting, kept in memory as a tuple during the merge so it
/// serializes identically to the reference's `[doc_id, raw_freq, tf_idf]`.
pub type ScoredPosting = (DocId, u32, f64);

/// A spill-file record: one line of `N.json`, `{ "<stem>": [[doc_id, raw_freq], ...] }`.
pub type SpillRecord = HashMap<Stem, Vec<(DocId, u32)>>;

/// A sealed-index record: one line of `final_index`, `{ "<stem>": [[doc_id, raw_freq, tf_idf], ...] }`.
pub type FinalRecord = HashMap<Stem, Vec<ScoredPosting>>;

/// Token→byte-offset index into a postings file.
pub type OffsetMap = HashMap<Stem, u64>;

/// `doc_id` (as a string key, matching the reference's `url_dict.json`) → URL.
pub type UrlMap = HashMap<String, String>;

/// Diagnostics accumulated by the Document Reader and written to `results.txt`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReaderStats {
    pub documents_processed: usize,
    pub unique_tokens: usize,
    pub small_files: Vec<String>,
    pub large_files: Vec<String>,
}

/// A single search result, pre-rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub urls: Vec<String>,
    pub normalized_query: String,
    pub exact: bool,
    pub elapsed_ms: u128,
}
