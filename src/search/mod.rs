//! Query Evaluator (§4.8) and Query Front-End Adapter (§4.9).
//!
//! `Searcher` holds only immutable state loaded once at startup: the
//! offset map, the url map, and the path to the sealed postings file. A
//! query opens its own handle onto `final_index` (§5's "independent file
//! handles per thread" — the simplest reading of that requirement is a
//! fresh handle per call, which also makes `Searcher` trivially `Sync`).

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::build::sidecar::{self, SidecarBundle};
use crate::error::QueryError;
use crate::extract;
use crate::stem;
use crate::types::{DocId, FinalRecord, OffsetMap, SearchResponse, UrlMap, RESULT_LIMIT};

/// Loaded, read-only query-time state.
#[derive(Debug, Clone)]
pub struct Searcher {
    offsets: OffsetMap,
    urls: UrlMap,
    final_index_path: PathBuf,
}

impl Searcher {
    /// Load the sidecar maps from `dir` and remember the path to
    /// `final_index` inside it. Fails if either sidecar is missing or
    /// unparseable (§7: fatal to the query).
    pub fn load(dir: &Path) -> Result<Self, QueryError> {
        let SidecarBundle { offsets, urls } = sidecar::load_sidecars(dir)?;
        Ok(Self {
            offsets,
            urls,
            final_index_path: dir.join(sidecar::FINAL_INDEX_FILE),
        })
    }

    /// Run a query end to end and measure elapsed wall-clock time (§4.9).
    pub fn search(&self, query: &str) -> Result<SearchResponse, QueryError> {
        let start = Instant::now();
        let (urls, normalized_query, exact) = self.evaluate(query)?;
        Ok(SearchResponse {
            urls,
            normalized_query,
            exact,
            elapsed_ms: start.elapsed().as_millis(),
        })
    }

    /// The query evaluator proper (§4.8), steps 1-10.
    fn evaluate(&self, query: &str) -> Result<(Vec<String>, String, bool), QueryError> {
        // Steps 1-2: tokenize and stem, zipped surface->stem.
        let surface_tokens = extract::tokenize_query(query);
        let mut surface_of: HashMap<String, String> = HashMap::new();
        let mut stems_in_order = Vec::with_capacity(surface_tokens.len());
        for surface in &surface_tokens {
            let stemmed = stem::stem_one(surface);
            surface_of.entry(stemmed.clone()).or_insert_with(|| surface.clone());
            stems_in_order.push(stemmed);
        }

        // Step 3: accept/drop against the offset map, deduplicating while
        // preserving first-seen order.
        let mut seen = HashSet::new();
        let mut accepted_terms = Vec::new();
        let mut exact = true;
        for s in stems_in_order {
            if !self.offsets.contains_key(&s) {
                exact = false;
                continue;
            }
            if seen.insert(s.clone()) {
                accepted_terms.push(s);
            }
        }

        // Step 4: empty accepted-term set.
        if accepted_terms.is_empty() {
            return Ok((Vec::new(), String::new(), false));
        }

        // Step 5: normalized query from surface forms of accepted terms.
        let normalized_query = accepted_terms
            .iter()
            .map(|s| surface_of.get(s).cloned().unwrap_or_else(|| s.clone()))
            .collect::<Vec<_>>()
            .join(" ");

        // Step 6: seek and read postings for each accepted term.
        let mut file = File::open(&self.final_index_path).map_err(QueryError::MissingArtifact)?;
        let mut per_term: Vec<Vec<(DocId, u32, f64)>> = Vec::with_capacity(accepted_terms.len());
        for term in &accepted_terms {
            per_term.push(read_postings(&mut file, &self.offsets, term)?);
        }

        // Step 7: conjunctive AND across all accepted terms.
        let mut doc_sets: Vec<HashSet<DocId>> = per_term
            .iter()
            .map(|postings| postings.iter().map(|(d, _, _)| *d).collect())
            .collect();
        let intersection: HashSet<DocId> = doc_sets
            .pop()
            .map(|first| {
                doc_sets.iter().fold(first, |acc, set| {
                    acc.intersection(set).copied().collect()
                })
            })
            .unwrap_or_default();

        // Step 8: score by summed tf-idf, ties by first term's insertion
        // order (stable sort preserves it).
        let mut scores: HashMap<DocId, f64> = HashMap::new();
        for postings in &per_term {
            for (doc_id, _, tf_idf) in postings {
                if intersection.contains(doc_id) {
                    *scores.entry(*doc_id).or_insert(0.0) += tf_idf;
                }
            }
        }

        let mut ordered: Vec<DocId> = Vec::with_capacity(intersection.len());
        let mut pushed = HashSet::with_capacity(intersection.len());
        for (doc_id, _, _) in &per_term[0] {
            if intersection.contains(doc_id) && pushed.insert(*doc_id) {
                ordered.push(*doc_id);
            }
        }
        ordered.sort_by(|a, b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // Step 9: URL de-fragmentation, capped at RESULT_LIMIT.
        let mut urls = Vec::with_capacity(RESULT_LIMIT);
        let mut seen_urls = HashSet::new();
        for doc_id in ordered {
            if urls.len() >= RESULT_LIMIT {
                break;
            }
            let Some(url) = self.urls.get(&doc_id.to_string()) else {
                continue;
            };
            let defragmented = url.split('#').next().unwrap_or(url).to_string();
            if seen_urls.insert(defragmented.clone()) {
                urls.push(defragmented);
            }
        }

        Ok((urls, normalized_query, exact))
    }
}

/// Seek to `term`'s offset, read exactly one line, and return its
/// postings.
fn read_postings(
    file: &mut File,
    offsets: &OffsetMap,
    term: &str,
) -> Result<Vec<(DocId, u32, f64)>, QueryError> {
    let offset = *offsets
        .get(term)
        .expect("caller only passes accepted (present) terms");
    file.seek(SeekFrom::Start(offset))
        .map_err(QueryError::PostingsRead)?;
    let mut reader = BufReader::new(&mut *file);
    let mut line = String::new();
    reader.read_line(&mut line).map_err(QueryError::PostingsRead)?;

    let record: FinalRecord = serde_json::from_str(line.trim_end())
        .map_err(|e| QueryError::CorruptRecord(term.to_string(), e))?;
    Ok(record.get(term).cloned().unwrap_or_default())
}

/// Render a `SearchResponse` as the front-end string contract in §6.
pub fn render_response(query: &str, response: &SearchResponse) -> String {
    let mut lines = Vec::new();
    if response.urls.is_empty() {
        lines.push(format!("No results for \"{query}\""));
    } else if response.exact {
        lines.push(format!("Showing results for \"{}\"", response.normalized_query));
        for (i, url) in response.urls.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, url));
        }
    } else {
        lines.push(format!(
            "No results for \"{query}\". Showing results for \"{}\"",
            response.normalized_query
        ));
        for (i, url) in response.urls.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, url));
        }
    }
    lines.push(format!("Search time: {} ms", response.elapsed_ms));
    lines.join("\n")
}
