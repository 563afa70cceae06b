//! Sidecar Writer/Loader (§4.7): the three JSON artifacts and the
//! diagnostic `results.txt` that a build seals alongside `final_index`.
//!
//! The loader is the query phase's only way in — it reads nothing else
//! off disk besides these files and `final_index` itself.

use std::fs;
use std::path::Path;

use crate::error::{BuildError, QueryError};
use crate::types::{OffsetMap, ReaderStats, UrlMap};

pub const FINAL_INDEX_FILE: &str = "final_index";
pub const OFFSET_MAP_FILE: &str = "combined_token_locations.json";
pub const URL_MAP_FILE: &str = "url_dict.json";
pub const RESULTS_FILE: &str = "results.txt";

/// Summary counters written to `results.txt`, beyond what `ReaderStats`
/// tracks on its own (which only sees the size gate, not acceptance).
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildCounts {
    pub documents_processed: usize,
    pub documents_indexed: usize,
    pub unique_tokens: usize,
}

/// Write `combined_token_locations.json`, `url_dict.json`, and
/// `results.txt` into `dir`.
pub fn write_sidecars(
    dir: &Path,
    offsets: &OffsetMap,
    urls: &UrlMap,
    stats: &ReaderStats,
    counts: BuildCounts,
) -> Result<(), BuildError> {
    let offsets_json = serde_json::to_string(offsets)
        .map_err(|e| BuildError::Sidecar(std::io::Error::other(e)))?;
    fs::write(dir.join(OFFSET_MAP_FILE), offsets_json).map_err(BuildError::Sidecar)?;

    let urls_json =
        serde_json::to_string(urls).map_err(|e| BuildError::Sidecar(std::io::Error::other(e)))?;
    fs::write(dir.join(URL_MAP_FILE), urls_json).map_err(BuildError::Sidecar)?;

    let results = format!(
        "number of documents processed: {}\n\
         number of documents indexed: {}\n\
         number of unique words: {}\n\
         number of undersized files skipped: {}\n\
         number of oversized files skipped: {}\n",
        counts.documents_processed,
        counts.documents_indexed,
        counts.unique_tokens,
        stats.small_files.len(),
        stats.large_files.len(),
    );
    fs::write(dir.join(RESULTS_FILE), results).map_err(BuildError::Sidecar)?;

    Ok(())
}

/// The two sealed maps the query phase needs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SidecarBundle {
    pub offsets: OffsetMap,
    pub urls: UrlMap,
}

/// Deserialize `combined_token_locations.json` and `url_dict.json` from
/// `dir`.
pub fn load_sidecars(dir: &Path) -> Result<SidecarBundle, QueryError> {
    let offsets_raw =
        fs::read_to_string(dir.join(OFFSET_MAP_FILE)).map_err(QueryError::MissingArtifact)?;
    let offsets: OffsetMap =
        serde_json::from_str(&offsets_raw).map_err(QueryError::CorruptSidecar)?;

    let urls_raw =
        fs::read_to_string(dir.join(URL_MAP_FILE)).map_err(QueryError::MissingArtifact)?;
    let urls: UrlMap = serde_json::from_str(&urls_raw).map_err(QueryError::CorruptSidecar)?;

    Ok(SidecarBundle { offsets, urls })
}
