//! CLI definitions for the webdex command-line interface.
//!
//! Two subcommands: `build` to crawl a corpus directory into a sealed
//! index, and `search` to run one query against a sealed index and print
//! the front-end string contract from §6.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "webdex", about = "Disk-backed inverted-index search engine", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a sealed index from a directory of crawled JSON documents
    Build {
        /// Root directory to recursively scan for documents
        #[arg(short, long, default_value = "DEV")]
        input: String,

        /// Directory to write the sealed index artifacts into
        #[arg(short, long, default_value = ".")]
        output: String,
    },

    /// Run one query against a sealed index
    Search {
        /// Directory holding the sealed index artifacts
        #[arg(short, long, default_value = ".")]
        index: String,

        /// The query string
        query: String,
    },

    /// Print the diagnostic counters from a sealed index's results.txt
    Inspect {
        /// Directory holding the sealed index artifacts
        #[arg(short, long, default_value = ".")]
        index: String,
    },
}
