//! Command-line interface for cdc-loadgen
//!
//! # Usage Examples
//!
//! ```bash
//! # Stream records described by a config file
//! cdc-loadgen generate --config loadgen.yaml
//!
//! # Flat parameters, 20 records per second, stop after 100
//! cdc-loadgen generate \
//!   --set format.type=structured \
//!   --set format.options.id=int \
//!   --set format.options.owner=name \
//!   --set operations=create,update,delete \
//!   --rate 20 --record-count 100
//!
//! # Bursts of 10s followed by 5s of silence
//! cdc-loadgen generate --config loadgen.yaml \
//!   --set burst.generateTime=10s --set burst.sleepTime=5s
//! ```
//!
//! Records are written to stdout as JSON lines; logs go to stderr and are
//! controlled with `RUST_LOG`.

use anyhow::Context;
use cdc_loadgen::{GeneratorConfig, ReadOutcome, Source};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "cdc-loadgen")]
#[command(about = "Synthetic change-event generator with burst rate limiting")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate records and write them to stdout as JSON lines
    Generate(GenerateArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// YAML or TOML configuration file
    #[arg(long, value_name = "PATH", env = "CDC_LOADGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Flat parameter override, e.g. `format.options.id=int` (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Records per second (0 disables the steady cap)
    #[arg(long, env = "CDC_LOADGEN_RATE")]
    rate: Option<f64>,

    /// Total records to generate (0 = unbounded)
    #[arg(long, env = "CDC_LOADGEN_RECORD_COUNT")]
    record_count: Option<u64>,

    /// Seed for deterministic payloads
    #[arg(long, env = "CDC_LOADGEN_SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args).await?,
    }

    Ok(())
}

fn load_config(args: &GenerateArgs) -> anyhow::Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    for param in &args.set {
        let (key, value) = param
            .split_once('=')
            .with_context(|| format!("Expected KEY=VALUE, got {param:?}"))?;
        config
            .set_param(key.trim(), value)
            .with_context(|| format!("Invalid parameter {param:?}"))?;
    }

    if let Some(rate) = args.rate {
        config.rate = Some(rate);
    }
    if let Some(record_count) = args.record_count {
        config.record_count = record_count;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    Ok(config)
}

async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let mut source = Source::open(&config).context("Failed to open source")?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt signal (Ctrl+C)");
            shutdown.cancel();
        }
    });

    let stdout = std::io::stdout();
    loop {
        match source.read(&cancel).await? {
            ReadOutcome::Record(record) => {
                let mut out = stdout.lock();
                serde_json::to_writer(&mut out, &record).context("Failed to encode record")?;
                writeln!(out).context("Failed to write record")?;
                out.flush().context("Failed to flush stdout")?;
            }
            ReadOutcome::Exhausted => break,
            ReadOutcome::Stopped => break,
        }
    }

    info!("Generated {} record(s)", source.emitted());
    Ok(())
}
