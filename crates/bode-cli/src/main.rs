//! Bode command-line interface.

mod output;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bode_core::config::AnalysisConfig;
use bode_core::frequency::SweepType;
use bode_core::response::PolePolicy;
use bode_core::stability::MarginStrategy;
use bode_core::BodeAnalysis;
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "bode")]
#[command(about = "Frequency response and stability margins of a transfer function", long_about = None)]
#[command(version)]
struct Cli {
    /// Numerator coefficients, highest power first (e.g. "10")
    #[arg(value_name = "NUMERATOR", default_value = "")]
    numerator: String,

    /// Denominator coefficients, highest power first (e.g. "1 3 3 1")
    #[arg(value_name = "DENOMINATOR", default_value = "")]
    denominator: String,

    /// Number of frequency points
    #[arg(short = 'n', long = "points")]
    points: Option<usize>,

    /// Lowest angular frequency (rad/s)
    #[arg(long)]
    start: Option<f64>,

    /// Highest angular frequency (rad/s)
    #[arg(long)]
    stop: Option<f64>,

    /// Linear instead of logarithmic point spacing
    #[arg(long)]
    linear: bool,

    /// Handling of frequencies that hit a pole
    #[arg(long, value_enum)]
    pole_policy: Option<PoleArg>,

    /// Magnitude (dB) used by `--pole-policy clamp`
    #[arg(long, value_name = "DB")]
    clamp_db: Option<f64>,

    /// Reporting of crossings that fall between samples: bracket or nearest
    #[arg(long)]
    strategy: Option<String>,

    /// JSON analysis configuration; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also emit every sample of the response
    #[arg(long)]
    trace: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PoleArg {
    Skip,
    Clamp,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&cli)?;
    log::debug!("configuration: {:?}", config);

    let analysis = BodeAnalysis::run(&cli.numerator, &cli.denominator, &config)
        .context("Invalid frequency sweep")?;

    if cli.json {
        let json = output::to_json(&analysis, &config, cli.trace)?;
        println!("{}", json);
    } else {
        output::print_text(&analysis, config.pole_policy, cli.trace);
    }

    Ok(())
}

/// Configuration file (if any) with command-line overrides applied.
fn build_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };

    let sweep = &mut config.sweep;
    if let Some(points) = cli.points {
        sweep.npoints = points;
    }
    if let Some(start) = cli.start {
        sweep.start = start;
    }
    if let Some(stop) = cli.stop {
        sweep.stop = stop;
    }
    if cli.linear {
        sweep.sweep_type = SweepType::Linear;
    }

    config.pole_policy = match (cli.pole_policy, cli.clamp_db) {
        (Some(PoleArg::Skip), _) => PolePolicy::Skip,
        (Some(PoleArg::Clamp), Some(db)) => PolePolicy::Clamp(db),
        (Some(PoleArg::Clamp), None) => PolePolicy::clamp(),
        (None, Some(db)) => PolePolicy::Clamp(db),
        (None, None) => config.pole_policy,
    };
    if let PolePolicy::Clamp(db) = config.pole_policy {
        if !db.is_finite() {
            bail!("Clamp level must be a finite number of dB, got {}", db);
        }
    }

    if let Some(ref name) = cli.strategy {
        config.margin_strategy = match MarginStrategy::from_str(name) {
            Some(strategy) => strategy,
            None => bail!("Unknown margin strategy '{}' (expected bracket or nearest)", name),
        };
    }

    Ok(config)
}

fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}
