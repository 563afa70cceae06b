//! Partial-Index Builder (§4.5): in-memory postings capped at
//! `PARTIAL_THRESHOLD` distinct tokens, spilled to disk as one JSON object
//! per line when the cap is hit.
//!
//! A spill is atomic per record: each line is written in full before the
//! next is started, so a crash mid-spill leaves a file truncated at a line
//! boundary rather than a corrupt one.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::types::{DocId, OffsetMap, RawPosting, SpillRecord, Stem, PARTIAL_THRESHOLD};

/// One sealed spill file together with the token→offset map built while
/// writing it.
#[derive(Debug)]
pub struct SpillFile {
    pub path: PathBuf,
    pub offsets: OffsetMap,
}

/// Accumulates `(doc_id, raw_freq)` postings for the documents processed
/// since the last spill.
#[derive(Debug, Default)]
pub struct PartialIndexBuilder {
    postings: HashMap<Stem, Vec<RawPosting>>,
    next_ordinal: usize,
}

impl PartialIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one document's stemmed token multiset, counting repeats into
    /// a single `raw_freq` per stem before appending the posting.
    pub fn add_document(&mut self, doc_id: DocId, stems: &[Stem]) {
        let mut counts: HashMap<&str, u32> = HashMap::with_capacity(stems.len());
        for stem in stems {
            *counts.entry(stem.as_str()).or_insert(0) += 1;
        }
        for (stem, raw_freq) in counts {
            self.postings
                .entry(stem.to_string())
                .or_default()
                .push(RawPosting { doc_id, raw_freq });
        }
    }

    /// Distinct stemmed-token count currently held in memory.
    pub fn distinct_token_count(&self) -> usize {
        self.postings.len()
    }

    pub fn should_spill(&self) -> bool {
        self.postings.len() >= PARTIAL_THRESHOLD
    }

    /// Flush the current in-memory map to `dir/{ordinal}.json` and clear it.
    /// Returns `None` without touching disk if nothing has accumulated.
    pub fn spill(&mut self, dir: &Path) -> Result<Option<SpillFile>, BuildError> {
        if self.postings.is_empty() {
            return Ok(None);
        }

        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        let path = dir.join(format!("{ordinal}.json"));
        let file = File::create(&path).map_err(BuildError::Spill)?;
        let mut writer = BufWriter::new(file);

        let mut offsets = OffsetMap::with_capacity(self.postings.len());
        let mut offset: u64 = 0;
        for (token, postings) in self.postings.drain() {
            let mut record: SpillRecord = HashMap::with_capacity(1);
            record.insert(
                token.clone(),
                postings.iter().map(|p| (p.doc_id, p.raw_freq)).collect(),
            );
            let mut line = serde_json::to_string(&record)
                .map_err(|e| BuildError::Spill(std::io::Error::other(e)))?;
            line.push('\n');

            offsets.insert(token, offset);
            writer.write_all(line.as_bytes()).map_err(BuildError::Spill)?;
            offset += line.len() as u64;
        }
        writer.flush().map_err(BuildError::Spill)?;

        Ok(Some(SpillFile { path, offsets }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn stems(words: &[&str]) -> Vec<Stem> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn counts_repeats_within_one_document() {
        let mut builder = PartialIndexBuilder::new();
        builder.add_document(DocId(1), &stems(&["run", "run", "fast"]));
        assert_eq!(builder.distinct_token_count(), 2);
    }

    #[test]
    fn spill_writes_one_line_per_token_and_records_offsets() {
        let dir = tempdir().unwrap();
        let mut builder = PartialIndexBuilder::new();
        builder.add_document(DocId(1), &stems(&["cat", "dog"]));
        builder.add_document(DocId(2), &stems(&["cat"]));

        let spill = builder.spill(dir.path()).unwrap().expect("non-empty spill");
        assert_eq!(builder.distinct_token_count(), 0, "map must be cleared");
        assert_eq!(spill.offsets.len(), 2);

        let contents = std::fs::read_to_string(&spill.path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        for (token, &offset) in &spill.offsets {
            let record: SpillRecord =
                serde_json::from_str(&contents[offset as usize..]).unwrap_or_else(|_| {
                    // a later line may also parse as valid JSON; reparse just
                    // this line by finding its terminating newline
                    let line_end = contents[offset as usize..].find('\n').unwrap();
                    serde_json::from_str(&contents[offset as usize..offset as usize + line_end])
                        .unwrap()
                });
            assert!(record.contains_key(token));
        }
    }

    #[test]
    fn empty_builder_spills_nothing() {
        let dir = tempdir().unwrap();
        let mut builder = PartialIndexBuilder::new();
        assert!(builder.spill(dir.path()).unwrap().is_none());
    }

    #[test]
    fn should_spill_honors_threshold() {
        let mut builder = PartialIndexBuilder::new();
        assert!(!builder.should_spill());
        for i in 0..PARTIAL_THRESHOLD {
            builder.add_document(DocId(1), &stems(&[&format!("tok{i}")]));
        }
        assert!(builder.should_spill());
    }
}
