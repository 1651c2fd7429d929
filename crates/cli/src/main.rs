//! DCPT prefetch predictor CLI.
//!
//! This binary replays memory-access traces through the predictor. It performs:
//! 1. **Trace run:** Load a `<pc> <addr>` trace, replay it against the reference host,
//!    and print statistics.
//! 2. **Config dump:** Print the effective configuration (defaults, file, and flag
//!    overrides) as JSON.

use clap::{Args, Parser, Subcommand};
use std::{fs, process};
use tracing_subscriber::EnvFilter;

use dcpt_core::config::Config;
use dcpt_core::sim::{Replay, load_trace};

#[derive(Parser, Debug)]
#[command(
    name = "dcpt",
    author,
    version,
    about = "Delta-correlating prefetch predictor",
    long_about = "Replay a memory-access trace through a DCPT prefetcher.\n\nTrace lines are '<pc> <addr>' in hex; '#' starts a comment.\n\nExamples:\n  dcpt run traces/stream.trace\n  dcpt run traces/mcf.trace --block-size 128 --stats prediction\n  dcpt config --config sweep.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace and print statistics.
    Run {
        /// Trace file to replay.
        trace: String,

        #[command(flatten)]
        overrides: Overrides,

        /// Statistics sections to print (training, prediction, completion). Default: all.
        #[arg(long, value_delimiter = ',')]
        stats: Vec<String>,
    },

    /// Print the effective configuration as JSON.
    Config {
        #[command(flatten)]
        overrides: Overrides,
    },
}

#[derive(Args, Debug)]
struct Overrides {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Cache block size in bytes.
    #[arg(long)]
    block_size: Option<u64>,

    /// Accesses until an issued fetch completes.
    #[arg(long)]
    fetch_latency: Option<u64>,

    /// Number of MSHR slots in the reference host.
    #[arg(long)]
    mshr_entries: Option<usize>,

    /// Log every correlation at debug level.
    #[arg(long)]
    trace_predictions: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            trace,
            overrides,
            stats,
        } => {
            init_tracing(overrides.trace_predictions);
            cmd_run(&trace, &overrides, &stats);
        }
        Commands::Config { overrides } => {
            init_tracing(false);
            let config = resolve_config(&overrides);
            match serde_json::to_string_pretty(&config) {
                Ok(json) => println!("{json}"),
                Err(e) => fatal(&format!("could not serialize configuration: {e}")),
            }
        }
    }
}

/// Installs a stderr subscriber honouring `RUST_LOG`.
///
/// Without `RUST_LOG`, only warnings are shown, or predictor debug output when
/// `verbose` is set.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "dcpt_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fatal(msg: &str) -> ! {
    eprintln!("\n[!] FATAL: {msg}");
    process::exit(1);
}

/// Builds the configuration: defaults, then the JSON file, then command-line flags.
fn resolve_config(overrides: &Overrides) -> Config {
    let mut config = match &overrides.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .unwrap_or_else(|e| fatal(&format!("could not read config '{path}': {e}")));
            Config::from_json(&text).unwrap_or_else(|e| fatal(&format!("{path}: {e}")))
        }
        None => Config::default(),
    };

    if let Some(block_size) = overrides.block_size {
        config.predictor.block_size = block_size;
    }
    if let Some(latency) = overrides.fetch_latency {
        config.host.fetch_latency = latency;
    }
    if let Some(entries) = overrides.mshr_entries {
        config.host.mshr_entries = entries;
    }
    if overrides.trace_predictions {
        config.predictor.trace_predictions = true;
    }

    if let Err(e) = config.validate() {
        fatal(&e.to_string());
    }
    config
}

/// Loads the trace, replays it, and prints the report.
fn cmd_run(trace: &str, overrides: &Overrides, stats: &[String]) {
    let config = resolve_config(overrides);

    let accesses = load_trace(trace)
        .unwrap_or_else(|e| fatal(&format!("could not load trace '{trace}': {e}")));

    println!(
        "Configuration: block {} B  fetch latency {}  MSHRs {}",
        config.predictor.block_size, config.host.fetch_latency, config.host.mshr_entries
    );
    println!("[*] Replaying {} accesses from {trace}", accesses.len());

    let mut replay = Replay::new(&config).unwrap_or_else(|e| fatal(&e.to_string()));
    let report = replay.run(&accesses);
    report.print_sections(stats);
}
