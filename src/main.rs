use std::io::stdout;
use std::path::Path;

use anyhow::Context;

use embd_features::config::{self, RunConfig};
use embd_features::embeddings::{download, EmbeddingTable};
use embd_features::features::{ConsoleProgress, Extraction, FeatureExtractor, NoProgress};
use embd_features::{logging, output};

fn main() {
    if let Err(e) = real_main() {
        eprintln!("[embd_features] fatal error: {e:?}");
        log::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let Some(cfg) = RunConfig::from_args(&args).map_err(|e| e.context(config::USAGE))? else {
        println!("{}", config::USAGE);
        return Ok(());
    };

    logging::init_logging(cfg.verbose)?;
    log::info!("Run config: {:?}", cfg);

    download::ensure_embeddings_file(
        &cfg.embeddings_path,
        &cfg.embeddings_url,
        cfg.embeddings_sha256.as_deref(),
    )
    .context("embeddings file unavailable")?;

    let table = EmbeddingTable::load(&cfg.embeddings_path, cfg.embedding_size)
        .with_context(|| format!("failed loading embeddings from {}", cfg.embeddings_path.display()))?;

    log::info!("-------- Feature Extraction --------");
    let train = extract_dataset(&cfg, &table, &cfg.train_set)?;
    let test = extract_dataset(&cfg, &table, &cfg.test_set)?;

    let report = output::FeatureReport::new(
        table.dimension(),
        output::DatasetFeatures::new(&cfg.train_set, &train),
        output::DatasetFeatures::new(&cfg.test_set, &test),
    );
    match &cfg.output {
        Some(path) => output::write_json_file(path, &report)?,
        None => output::write_json(&mut stdout(), &report)?,
    }

    log::info!("Done: {} train rows, {} test rows", train.len(), test.len());
    Ok(())
}

fn extract_dataset(cfg: &RunConfig, table: &EmbeddingTable, path: &Path) -> anyhow::Result<Extraction> {
    let extractor = FeatureExtractor::new(table);
    let result = if cfg.show_progress {
        eprintln!("Extracting embedding representation for file {}:", path.display());
        extractor.with_progress(ConsoleProgress::stderr()).extract(path)
    } else {
        extractor.with_progress(NoProgress).extract(path)
    };
    let extraction = result.with_context(|| format!("failed extracting features from {}", path.display()))?;

    for (label, count) in extraction.label_counts() {
        log::info!("  {}: {} examples", label, count);
    }
    Ok(extraction)
}
