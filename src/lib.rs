//! webdex: a disk-backed inverted-index search engine over a crawled web
//! corpus.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌──────┐   ┌────────┐   ┌──────────────┐
//! │ reader   │──▶│ extract   │──▶│ stem │──▶│ dedup  │──▶│ build::      │
//! │ (§4.1)   │   │ (§4.2)    │   │(§4.3)│   │ (§4.4) │   │ partial/merge│
//! └──────────┘   └───────────┘   └──────┘   └────────┘   │ /sidecar     │
//!                                                          │ (§4.5-4.7)   │
//!                                                          └──────┬───────┘
//!                                                                 ▼
//!                                                          ┌──────────────┐
//!                                                          │ search::     │
//!                                                          │ Searcher     │
//!                                                          │ (§4.8-4.9)   │
//!                                                          └──────────────┘
//! ```
//!
//! The build phase (`build::run_build`) runs once offline and seals three
//! artifacts to disk: `final_index`, `combined_token_locations.json`, and
//! `url_dict.json`. The query phase (`search::Searcher`) loads those
//! artifacts read-only and answers one query per call; it holds no
//! mutable state between queries.

pub mod build;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod reader;
pub mod search;
pub mod stem;
pub mod types;

pub use build::{run_build, BuildSummary, Builder};
pub use error::{BuildError, QueryError};
pub use search::{render_response, Searcher};
pub use types::SearchResponse;
