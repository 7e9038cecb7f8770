// IMPORTANT:
// Keep ALL numeric values centralized here (repo rule: no hardcoded numeric values scattered around).

use std::path::PathBuf;

use anyhow::{bail, Context};

// NOTE: VERSION must stay in sync with the `version` field in Cargo.toml.
pub const VERSION: &str = "0.3.0";

pub mod logging {
    pub const LOG_DIR_REL: &str = ".embd_features/logs";
    pub const LOG_FILE_NAME: &str = "embd_features.log";

    pub const LOG_ROTATE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
    pub const LOG_ROTATE_KEEP_FILES: usize = 5;
}

pub mod embedding {
    // Dimensionality of the wiki embeddings the tool was built around.
    pub const DEFAULT_EMBEDDING_SIZE: usize = 200;
    pub const DEFAULT_EMBEDDINGS_PATH: &str = "./wiki_embeddings.txt";

    // Fetched only when the embeddings file is missing locally.
    pub const DEFAULT_EMBEDDINGS_URL: &str = "https://www.dropbox.com/s/h87tstu4awtvgew/wiki_embeddings.txt";
    pub const EMBEDDINGS_URL_ENV: &str = "EMBD_FEATURES_EMBEDDINGS_URL";

    pub const DOWNLOAD_TIMEOUT_SECS: u64 = 300;
}

pub mod progress {
    pub const BAR_WIDTH: usize = 100;
}

pub const USAGE: &str = "\
Text-based classification features using word-embedding representation

Usage: embd_features --train_set <path> --test_set <path> [options]

Options:
  --train_set <path>          File containing sentences to be used for training
  --test_set <path>           File containing sentences to be used for testing
  --embeddings_file <path>    Text file containing pre-trained word embeddings
  --embedding_size <n>        Number of floats per word vector (default 200)
  --embeddings_url <url>      Where to fetch the embeddings file if it is missing
  --embeddings_sha256 <hex>   Expected SHA256 of the downloaded embeddings file
  --output <path>             Write extracted features here instead of stdout
  --quiet                     Disable the progress bar
  --verbose                   Mirror info-level logs to stderr
  --help                      Print this message";

/// Everything the driver needs for one run, resolved from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub train_set: PathBuf,
    pub test_set: PathBuf,
    pub embeddings_path: PathBuf,
    pub embedding_size: usize,
    pub embeddings_url: String,
    pub embeddings_sha256: Option<String>,
    pub output: Option<PathBuf>,
    pub show_progress: bool,
    pub verbose: bool,
}

impl RunConfig {
    /// Parse `args` (including the program name at index 0).
    /// Returns `Ok(None)` when `--help` was requested.
    pub fn from_args(args: &[String]) -> anyhow::Result<Option<Self>> {
        if has_flag(args, "--help") || has_flag(args, "-h") {
            return Ok(None);
        }

        let train_set = read_arg_value(args, "--train_set").context("missing --train_set")?;
        let test_set = read_arg_value(args, "--test_set").context("missing --test_set")?;

        let embeddings_path = read_arg_value(args, "--embeddings_file")
            .unwrap_or_else(|| embedding::DEFAULT_EMBEDDINGS_PATH.to_string());

        let embedding_size = match read_arg_value(args, "--embedding_size") {
            Some(v) => v
                .parse::<usize>()
                .with_context(|| format!("invalid --embedding_size: {v}"))?,
            None => embedding::DEFAULT_EMBEDDING_SIZE,
        };
        if embedding_size == 0 {
            bail!("--embedding_size must be a positive integer");
        }

        // Explicit flag beats env override beats compiled-in default.
        let embeddings_url = read_arg_value(args, "--embeddings_url")
            .or_else(|| {
                std::env::var(embedding::EMBEDDINGS_URL_ENV)
                    .ok()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| embedding::DEFAULT_EMBEDDINGS_URL.to_string());

        Ok(Some(Self {
            train_set: PathBuf::from(train_set),
            test_set: PathBuf::from(test_set),
            embeddings_path: PathBuf::from(embeddings_path),
            embedding_size,
            embeddings_url,
            embeddings_sha256: read_arg_value(args, "--embeddings_sha256").map(|s| s.to_lowercase()),
            output: read_arg_value(args, "--output").map(PathBuf::from),
            show_progress: !has_flag(args, "--quiet"),
            verbose: has_flag(args, "--verbose"),
        }))
    }
}

fn read_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .filter(|v| !v.starts_with("--"))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().skip(1).any(|a| a == key)
}
