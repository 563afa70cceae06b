//! Merger + Scorer (§4.6): unions the spill files into one sealed postings
//! file with tf-idf weights, plus the offset map that indexes it.
//!
//! For every token in the union of all spill offset maps, this seeks into
//! each spill file that mentions it, concatenates the postings, scores
//! them, and appends one line to `final_index`. Doc ids within a merged
//! posting list follow spill order then within-spill insertion order —
//! queries never depend on that order (§4.6).

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::Path;

use crate::build::partial::SpillFile;
use crate::error::BuildError;
use crate::types::{DocId, FinalRecord, OffsetMap, ScoredPosting, SpillRecord};

/// Merge `spills` into `final_index_path`, scoring every posting with
/// tf-idf against `doc_lengths` and `n_docs`. Returns the offset map for
/// the sealed file.
pub fn merge(
    spills: &[SpillFile],
    doc_lengths: &HashMap<DocId, usize>,
    n_docs: u32,
    final_index_path: &Path,
) -> Result<OffsetMap, BuildError> {
    let word_set: HashSet<&str> = spills
        .iter()
        .flat_map(|spill| spill.offsets.keys().map(String::as_str))
        .collect();

    let mut readers: Vec<BufReader<File>> = spills
        .iter()
        .map(|spill| File::open(&spill.path).map(BufReader::new).map_err(BuildError::Merge))
        .collect::<Result<_, _>>()?;

    let out_file = File::create(final_index_path).map_err(BuildError::Merge)?;
    let mut out = std::io::BufWriter::new(out_file);

    let mut combined_offsets = OffsetMap::with_capacity(word_set.len());
    let mut write_offset: u64 = 0;

    let mut tokens: Vec<&str> = word_set.into_iter().collect();
    tokens.sort_unstable();

    for token in tokens {
        let mut collected: Vec<(DocId, u32)> = Vec::new();
        for (spill, reader) in spills.iter().zip(readers.iter_mut()) {
            let Some(&byte_offset) = spill.offsets.get(token) else {
                continue;
            };
            collected.extend(read_one_record(reader, byte_offset, token)?);
        }

        let df = collected.len();
        let scored: Vec<ScoredPosting> = collected
            .into_iter()
            .map(|(doc_id, raw_freq)| {
                let doc_len = doc_lengths.get(&doc_id).copied().unwrap_or(1).max(1) as f64;
                let tf = raw_freq as f64 / doc_len;
                let idf = if df == 0 {
                    0.0
                } else {
                    (n_docs as f64 / df as f64).ln()
                };
                let tf_idf = round5(tf * idf);
                (doc_id, raw_freq, tf_idf)
            })
            .collect();

        let mut record: FinalRecord = HashMap::with_capacity(1);
        record.insert(token.to_string(), scored);
        let mut line = serde_json::to_string(&record)
            .map_err(|e| BuildError::Merge(std::io::Error::other(e)))?;
        line.push('\n');

        combined_offsets.insert(token.to_string(), write_offset);
        out.write_all(line.as_bytes()).map_err(BuildError::Merge)?;
        write_offset += line.len() as u64;
    }

    out.flush().map_err(BuildError::Merge)?;
    Ok(combined_offsets)
}

/// Seek to `offset` in `reader`, read exactly one line, and pull the
/// postings out for `token`. `BufReader::seek` discards any stale buffered
/// bytes from wherever the reader last stood, so this is safe to call
/// out of order across tokens.
fn read_one_record(
    reader: &mut BufReader<File>,
    offset: u64,
    token: &str,
) -> Result<Vec<(DocId, u32)>, BuildError> {
    reader.seek(SeekFrom::Start(offset)).map_err(BuildError::Merge)?;
    let mut line = String::new();
    reader.read_line(&mut line).map_err(BuildError::Merge)?;

    let record: SpillRecord = serde_json::from_str(line.trim_end())
        .map_err(|e| BuildError::Merge(std::io::Error::other(e)))?;
    Ok(record.get(token).cloned().unwrap_or_default())
}

/// Round half-to-even at 5 decimal places.
fn round5(x: f64) -> f64 {
    let factor = 100_000.0_f64;
    (x * factor).round_ties_even() / factor
}
