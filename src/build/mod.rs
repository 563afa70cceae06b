//! Build pipeline orchestration: the `Builder` value that owns every piece
//! of build-phase state and is consumed when the index is sealed (§9).
//!
//! `run_build` wires together the reader, extractor, stemmer, duplicate
//! detector, and partial-index builder into the pipeline described in §2:
//! read → extract → stem → dedup → accumulate → spill → merge → seal. There
//! is no resumability — a build either runs to completion or its partial
//! indices are discarded (§5).
//!
//! Extraction and stemming are pure per-document functions with no shared
//! state, so they run in parallel over the whole batch first (the teacher's
//! `par_iter()`-over-documents shape from `src/build/parallel.rs`). The
//! duplicate detector and `doc_id` assignment are not pure — acceptance of
//! one document depends on every document accepted before it — so that fold
//! back into `Builder` stays a single-threaded loop over the parallel
//! stage's results, preserving document-order determinism (§5).

pub mod merge;
pub mod partial;
pub mod sidecar;

use std::collections::HashMap;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::dedup::{DedupOutcome, DuplicateDetector};
use crate::error::BuildError;
use crate::extract;
use crate::reader::{self, RawDocument};
use crate::stem;
use crate::types::{DocId, ReaderStats, Stem, UrlMap};

use partial::{PartialIndexBuilder, SpillFile};
use sidecar::BuildCounts;

/// The result of the parallel extract+stem stage for one raw document:
/// `None` if it was rejected as non-HTML or too short (§4.2), `Some` with
/// both the base token multiset (needed by the duplicate detector) and its
/// stems (needed by the partial index) otherwise.
type ExtractedDoc = (RawDocument, Vec<String>, Vec<Stem>);

/// Everything a completed build leaves behind, for the caller to report.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub documents_processed: usize,
    pub documents_indexed: usize,
    pub unique_tokens: usize,
    pub spill_files: usize,
    pub small_files: usize,
    pub large_files: usize,
}

/// Owns all build-phase mutable state: the next `doc_id` to assign, the
/// url and document-length maps, the duplicate detector, and the
/// in-memory partial index. Consumed by `seal`.
pub struct Builder {
    next_doc_id: DocId,
    url_map: UrlMap,
    doc_lengths: HashMap<DocId, usize>,
    dedup: DuplicateDetector,
    partial: PartialIndexBuilder,
    spills: Vec<SpillFile>,
    stats: ReaderStats,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            next_doc_id: DocId::new(1),
            url_map: UrlMap::new(),
            doc_lengths: HashMap::new(),
            dedup: DuplicateDetector::new(),
            partial: PartialIndexBuilder::new(),
            spills: Vec::new(),
            stats: ReaderStats::default(),
        }
    }

    /// Dedup-check and index one already-extracted-and-stemmed document.
    /// Every rejection path is silent per §7 — the document simply
    /// contributes nothing. `tokens` must be the document's base token
    /// multiset (pre-stem, as the duplicate detector expects) and `stems`
    /// its stemmed form.
    fn ingest(
        &mut self,
        doc: RawDocument,
        tokens: &[String],
        stems: &[Stem],
        spill_dir: &Path,
    ) -> Result<(), BuildError> {
        if self.dedup.check_and_insert(tokens) != DedupOutcome::Accepted {
            return Ok(());
        }

        let doc_id = self.next_doc_id;
        self.next_doc_id = self.next_doc_id.next();
        self.url_map.insert(doc_id.to_string(), doc.url);
        self.doc_lengths.insert(doc_id, tokens.len());

        self.partial.add_document(doc_id, stems);

        if self.partial.should_spill() {
            if let Some(spill) = self.partial.spill(spill_dir)? {
                self.spills.push(spill);
            }
        }
        Ok(())
    }

    /// Run the full build: enumerate `root`, extract+stem every survivor in
    /// parallel, fold the results into the index sequentially, spill the
    /// remainder, merge the spills, and seal the three artifacts into
    /// `output_dir`.
    pub fn build(mut self, root: &Path, output_dir: &Path) -> Result<BuildSummary, BuildError> {
        std::fs::create_dir_all(output_dir).map_err(BuildError::Sidecar)?;

        let raw_docs = reader::read_corpus(root, &mut self.stats);
        let documents_processed = raw_docs.len();

        let pb = ProgressBar::new(raw_docs.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} indexing [{bar:40.cyan/dim}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("━━╸"),
        );

        // Parallel stage: extraction and stemming are pure per-document
        // functions, so run them across the whole batch at once. Order is
        // preserved by `par_iter().collect()`, which matters downstream
        // because doc_id assignment in the sequential fold below depends
        // on it.
        let extracted: Vec<Option<ExtractedDoc>> = raw_docs
            .into_par_iter()
            .map(|doc| {
                let tokens = extract::extract(&doc.html)?;
                let stems = stem::stem_all(&tokens);
                Some((doc, tokens, stems))
            })
            .collect();

        for item in extracted {
            if let Some((doc, tokens, stems)) = item {
                self.ingest(doc, &tokens, &stems, output_dir)?;
            }
            pb.inc(1);
        }
        pb.finish_with_message(format!("{} documents accepted", self.next_doc_id.get() - 1));

        if let Some(spill) = self.partial.spill(output_dir)? {
            self.spills.push(spill);
        }

        let documents_indexed = (self.next_doc_id.get() - 1) as usize;
        if documents_indexed == 0 {
            return Err(BuildError::EmptyCorpus(root.display().to_string()));
        }

        let final_index_path = output_dir.join(sidecar::FINAL_INDEX_FILE);
        let offsets = merge::merge(
            &self.spills,
            &self.doc_lengths,
            documents_indexed as u32,
            &final_index_path,
        )?;
        let unique_tokens = offsets.len();

        sidecar::write_sidecars(
            output_dir,
            &offsets,
            &self.url_map,
            &self.stats,
            BuildCounts {
                documents_processed,
                documents_indexed,
                unique_tokens,
            },
        )?;

        for spill in &self.spills {
            let _ = std::fs::remove_file(&spill.path);
        }

        Ok(BuildSummary {
            documents_processed,
            documents_indexed,
            unique_tokens,
            spill_files: self.spills.len(),
            small_files: self.stats.small_files.len(),
            large_files: self.stats.large_files.len(),
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper matching the teacher's `run_build` entry point.
pub fn run_build(root: &Path, output_dir: &Path) -> Result<BuildSummary, BuildError> {
    Builder::new().build(root, output_dir)
}
