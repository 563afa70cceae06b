//! webdex CLI: build a sealed index from a crawled corpus, then query it.
//!
//! ```bash
//! # Build an index from crawled JSON documents
//! webdex build --input ./DEV --output ./index
//!
//! # Query it
//! webdex search --index ./index "machine learning"
//! ```

mod cli;

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use webdex::build::sidecar::RESULTS_FILE;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => run_build_command(&input, &output),
        Commands::Search { index, query } => run_search_command(&index, &query),
        Commands::Inspect { index } => run_inspect_command(&index),
    }
}

fn run_build_command(input: &str, output: &str) {
    match webdex::run_build(Path::new(input), Path::new(output)) {
        Ok(summary) => {
            eprintln!(
                "✅ indexed {}/{} documents ({} unique tokens, {} spill files, {} undersized, {} oversized)",
                summary.documents_indexed,
                summary.documents_processed,
                summary.unique_tokens,
                summary.spill_files,
                summary.small_files,
                summary.large_files,
            );
        }
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}

fn run_search_command(index: &str, query: &str) {
    let searcher = match webdex::Searcher::load(Path::new(index)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    match searcher.search(query) {
        Ok(response) => println!("{}", webdex::render_response(query, &response)),
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}

fn run_inspect_command(index: &str) {
    let path = Path::new(index).join(RESULTS_FILE);
    match std::fs::read_to_string(&path) {
        Ok(contents) => print!("{contents}"),
        Err(e) => {
            eprintln!("❌ failed to read {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}
