//! Sampler CLI - uniform random draws from the command line
//!
//! Operational front end for `sampler_core`.
//!
//! # Commands
//!
//! - `sampler draw --kind i32 --min 1 --max 6 --count 10` - Print uniform draws
//! - `sampler stats --kind f64 --min 0 --max 1 --count 100000` - Report sample statistics
//! - `sampler check` - Verify the entropy source and both sampler variants
//!
//! # Configuration
//!
//! Settings resolve in order of precedence: command-line flags, then
//! `SAMPLER_*` environment variables, then the `--config` TOML file, then
//! built-in defaults.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::{draw::DrawArgs, stats::StatsArgs, Kind, Source};
use config::{build_config, CliArgs};
pub use error::{CliError, Result};

/// Uniform random sampler CLI
#[derive(Parser)]
#[command(name = "sampler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print uniformly distributed values
    Draw {
        /// Numeric type to draw
        #[arg(short, long, value_enum)]
        kind: Kind,

        /// Lower bound (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        min: String,

        /// Upper bound (inclusive for integers, exclusive for floats)
        #[arg(long, allow_hyphen_values = true)]
        max: String,

        /// Number of values
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Draw from the process-wide sampler instead of a fresh one
        #[arg(long)]
        shared: bool,
    },

    /// Report mean and chi-square uniformity of a batch of draws
    Stats {
        /// Numeric type to draw
        #[arg(short, long, value_enum)]
        kind: Kind,

        /// Lower bound (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        min: String,

        /// Upper bound (inclusive for integers, exclusive for floats)
        #[arg(long, allow_hyphen_values = true)]
        max: String,

        /// Number of values
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Histogram bins for the chi-square statistic
        #[arg(short, long)]
        bins: Option<usize>,

        /// Draw from the process-wide sampler instead of a fresh one
        #[arg(long)]
        shared: bool,
    },

    /// Check the entropy source and both sampler variants
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let (count, bins) = match &self.command {
            Commands::Draw { count, .. } => (*count, None),
            Commands::Stats { count, bins, .. } => (*count, *bins),
            Commands::Check => (None, None),
        };
        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            format: self.format.clone(),
            count,
            bins,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level.as_filter_str());
    debug!(
        log_level = %config.log_level,
        format = %config.format,
        count = config.count,
        bins = config.bins,
        "Configuration loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Draw {
            kind,
            min,
            max,
            shared,
            ..
        } => commands::draw::run(
            &DrawArgs {
                kind,
                min,
                max,
                count: config.count,
                source: Source::from_flag(shared),
                format: config.format,
            },
            &mut out,
        )?,
        Commands::Stats {
            kind,
            min,
            max,
            shared,
            ..
        } => commands::stats::run(
            &StatsArgs {
                kind,
                min,
                max,
                count: config.count,
                bins: config.bins,
                source: Source::from_flag(shared),
                format: config.format,
            },
            &mut out,
        )?,
        Commands::Check => commands::check::run(config.format, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
