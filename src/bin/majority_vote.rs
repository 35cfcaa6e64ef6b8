//! Build the consensus text of one page from the command line.
//!
//! Usage: `majority_vote <ensemble.json> <page_id> [page.html]`
//!
//! Reads HTML from the file or stdin and prints `{"page_id", "plaintext"}` as
//! JSON. Logging goes to stderr and is controlled by `RUST_LOG`.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use serde::Serialize;
use tracing::error;
use tracing_subscriber::EnvFilter;
use vote_extract::{EnsembleConfig, MajorityVote};

#[derive(Serialize)]
struct Output<'a> {
    page_id: &'a str,
    plaintext: String,
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let (Some(config_path), Some(page_id)) = (args.next(), args.next()) else {
        return Err("usage: majority_vote <ensemble.json> <page_id> [page.html]".into());
    };

    let html = match args.next() {
        Some(path) => fs::read(PathBuf::from(path))?,
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
    };

    let config = EnsembleConfig::from_path(&PathBuf::from(config_path))?;
    let cache = config.cache();
    let plaintext = MajorityVote::new(&cache).extract_bytes(
        &html,
        &page_id,
        &config.model_names(),
        &config.weights(),
        &config.vote_options(),
    )?;

    let output = Output {
        page_id: &page_id,
        plaintext,
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "vote_extract=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        error!(error = %e, "majority vote failed");
        std::process::exit(1);
    }
}
