//! Prepare a paired corpus for sequence-to-sequence training
//!
//! Reads a TAB-separated corpus, resolves source and target vocabularies,
//! encodes the pairs and runs shuffled mini-batch passes over them.
//!
//! # Usage
//!
//! ```bash
//! seq2seq-prepare \
//!   --corpus train.tsv \
//!   [--config dataset.json] \
//!   [--src-vocab src.vocab] \
//!   [--tgt-vocab tgt.vocab] \
//!   [--batch-size 32] \
//!   [--seed 42] \
//!   [--epochs 1] \
//!   [--save-vocab ./vocab]
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use seq2seq_dataset::{Dataset, DatasetConfig, VocabSource};
use seq2seq_vocab::write_vocabulary;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Prepare a paired corpus for sequence-to-sequence training
#[derive(Parser, Debug)]
#[command(name = "seq2seq-prepare")]
#[command(about = "Filter, encode and batch a paired sequence corpus", long_about = None)]
struct Args {
    /// TAB-separated corpus, one source/target pair per line
    #[arg(long, value_name = "PATH", required = true)]
    corpus: PathBuf,

    /// Dataset configuration file (JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ranked source vocabulary list (built from the corpus if omitted)
    #[arg(long, value_name = "PATH")]
    src_vocab: Option<PathBuf>,

    /// Ranked target vocabulary list (built from the corpus if omitted)
    #[arg(long, value_name = "PATH")]
    tgt_vocab: Option<PathBuf>,

    /// Pairs per mini-batch (overrides the config file)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Shuffle seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of shuffled passes over the corpus
    #[arg(long, default_value = "1")]
    epochs: usize,

    /// Directory to write src.vocab and tgt.vocab into
    #[arg(long, value_name = "DIR")]
    save_vocab: Option<PathBuf>,

    /// Suppress progress output
    #[arg(long)]
    quiet: bool,
}

fn init_tracing(quiet: bool) -> Result<()> {
    let default_directive = if quiet { "seq2seq=warn" } else { "seq2seq=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                default_directive
                    .parse()
                    .context("Invalid default log directive")?,
            ),
        )
        .init();
    Ok(())
}

fn save_vocabularies(dataset: &Dataset, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create vocabulary directory: {:?}", dir))?;

    let src_path = dir.join("src.vocab");
    write_vocabulary(dataset.input_vocab(), &src_path)
        .with_context(|| format!("Failed to write source vocabulary: {:?}", src_path))?;
    let tgt_path = dir.join("tgt.vocab");
    write_vocabulary(dataset.output_vocab(), &tgt_path)
        .with_context(|| format!("Failed to write target vocabulary: {:?}", tgt_path))?;

    tracing::info!(dir = %dir.display(), "saved vocabularies");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.quiet)?;

    // Load configuration from file or use defaults
    let mut config = if let Some(config_path) = &args.config {
        DatasetConfig::from_file(config_path).context("Failed to load config file")?
    } else {
        DatasetConfig::default()
    };
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut dataset = Dataset::from_file(
        &args.corpus,
        &config,
        VocabSource::from(args.src_vocab.clone()),
        VocabSource::from(args.tgt_vocab.clone()),
    )
    .with_context(|| format!("Failed to prepare corpus: {:?}", args.corpus))?;

    if !args.quiet {
        println!(
            "pairs: {} | src vocab: {} | tgt vocab: {} | batches of {}: {}",
            dataset.len(),
            dataset.input_vocab().len(),
            dataset.output_vocab().len(),
            config.batch_size,
            dataset.num_batches(config.batch_size),
        );
    }

    if let Some(dir) = &args.save_vocab {
        save_vocabularies(&dataset, dir)?;
    }

    for epoch in 0..args.epochs {
        // Only the first pass is seeded; later passes continue the same stream
        let seed = if epoch == 0 { config.seed } else { None };
        dataset.shuffle(seed);

        let mut batches = 0usize;
        let mut tokens = 0usize;
        for batch in dataset
            .make_batches(config.batch_size)
            .context("Failed to make batches")?
        {
            batches += 1;
            tokens += batch.num_tokens();
        }

        if !args.quiet {
            println!("epoch {}: {} batches, {} tokens", epoch + 1, batches, tokens);
        }
    }

    Ok(())
}
