use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use logreport_cli::commands;
use logreport_cli::config::Config;

#[derive(Parser)]
#[command(name = "logreport")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Generates a per-URL latency report from the latest nginx access log",
    long_about = "logreport scans a log directory for the most recent nginx access log \
                  (plain or gzip-compressed, dated by filename), aggregates request \
                  latency per URL, and renders an HTML report of the slowest endpoints."
)]
struct Cli {
    /// Path to a YAML config file (missing keys fall back to defaults)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output format for the stdout summary (json, pretty)
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    commands::report::execute(&config, &cli.format)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("logreport_cli=debug,logreport_core=debug")
    } else {
        EnvFilter::new("logreport_cli=info,logreport_core=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
