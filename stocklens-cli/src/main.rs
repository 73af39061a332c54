//! StockLens CLI: run the analysis pipeline and inspect persisted bundles.
//!
//! Commands:
//! - `run` : validate a price CSV, run the six analyzers, save the bundle
//! - `inspect` : print the per-module summary of a saved bundle

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use stocklens_runner::export::meta_path_for;
use stocklens_runner::{load_bundle, load_metadata, BundleSummary, Pipeline, PipelineConfig};

#[derive(Parser)]
#[command(
    name = "stocklens",
    version,
    about = "StockLens: time-series analysis of daily stock prices"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a price CSV and save analysis_results.json.
    Run {
        /// Price CSV. Defaults to input_folder/stock_data.csv (or the config's input_path).
        input: Option<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for the result bundle.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Run the analyzers one after another instead of in parallel.
        #[arg(long, default_value_t = false)]
        sequential: bool,
    },
    /// Print the per-module summary of a saved bundle.
    Inspect {
        /// Bundle file. Defaults to output/analysis_results.json.
        #[arg(default_value = "output/analysis_results.json")]
        bundle: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            config,
            output_dir,
            sequential,
        } => run_cmd(input, config, output_dir, sequential),
        Commands::Inspect { bundle } => inspect_cmd(&bundle),
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run_cmd(
    input: Option<PathBuf>,
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    sequential: bool,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    // Flags override file values
    if let Some(input) = input {
        config = config.with_input(input);
    }
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }
    if sequential {
        config = config.with_parallelism(false);
    }

    info!(
        input = %config.input_path.display(),
        output = %config.output_dir.display(),
        parallel = config.parallel,
        "stocklens {} starting",
        env!("CARGO_PKG_VERSION")
    );

    let run = Pipeline::new(config).run().context("analysis failed")?;

    println!("{}", BundleSummary::from_bundle(&run.bundle));
    println!();
    println!(
        "Analysis complete. Results saved to: {}",
        run.bundle_path.display()
    );
    Ok(())
}

fn inspect_cmd(bundle_path: &Path) -> Result<()> {
    let bundle = load_bundle(bundle_path)
        .with_context(|| format!("loading bundle {}", bundle_path.display()))?;

    let meta_path = meta_path_for(bundle_path);
    if meta_path.exists() {
        let meta = load_metadata(&meta_path)
            .with_context(|| format!("loading metadata {}", meta_path.display()))?;
        println!("Bundle:    {}", bundle_path.display());
        println!("Input:     {}", meta.input_path.display());
        println!("Generated: {}", meta.generated_at.format("%Y-%m-%d %H:%M:%S"));
        match (meta.first_date, meta.last_date) {
            (Some(first), Some(last)) => println!("Rows:      {} ({first} to {last})", meta.rows),
            _ => println!("Rows:      {}", meta.rows),
        }
        println!("Dataset:   {}", short_hash(&meta.dataset_hash));
        for warning in &meta.warnings {
            println!("Warning:   {warning}");
        }
        println!();
    }

    println!("{}", BundleSummary::from_bundle(&bundle));
    Ok(())
}

/// First 16 characters of a hash; the sidecar is user-editable text.
fn short_hash(hash: &str) -> String {
    hash.chars().take(16).collect()
}
