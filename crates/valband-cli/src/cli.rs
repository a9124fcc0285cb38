//! CLI argument definitions for valband.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `trend` | Fit the log-linear trend and dispersion of a ratio history |
//! | `bands` | Trend plus dispersion bands |
//! | `chart` | Full chart payload, optionally with the latest snapshot |
//! | `snapshot` | Validate and echo the latest snapshot |
//! | `ratio` | Assemble the ratio series from index closes and aggregate observations |
//! | `render` | Draw the chart with its overlays to an SVG file |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--log-level` | `warn` | Tracing filter when `RUST_LOG` is unset |
//! | `--log-format` | `pretty` | Log line format on stderr |
//!
//! # Examples
//!
//! ```bash
//! valband chart --history data/history.json --latest data/latest.json --pretty
//! valband ratio --closes closes.json --aggregate gdp.json --out-dir data
//! valband render --history data/history.json --out chart.svg --hover-index 120
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Market valuation ratio against its long-run trend and dispersion bands.
#[derive(Debug, Parser)]
#[command(name = "valband", author, version, about = "Valuation ratio trend and band charts")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Log filter directive, overridden by `RUST_LOG`.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Ndjson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the trend and dispersion of a ratio history.
    Trend(TrendArgs),
    /// Compute the trend plus dispersion bands.
    Bands(BandsArgs),
    /// Assemble the chart payload for the rendering host.
    Chart(ChartArgs),
    /// Validate the latest snapshot record.
    Snapshot(SnapshotArgs),
    /// Assemble the ratio series from index closes and aggregate observations.
    Ratio(RatioArgs),
    /// Render the chart and its overlays to SVG.
    Render(RenderArgs),
}

/// Peak calibration window; unset bounds fall back to the environment, then the defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct PeakArgs {
    /// First day of the peak window (YYYY-MM-DD).
    #[arg(long)]
    pub peak_start: Option<String>,

    /// Last day of the peak window (YYYY-MM-DD).
    #[arg(long)]
    pub peak_end: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct TrendArgs {
    /// Ratio history JSON file (`[{"date", "buffett_ratio"}]`).
    #[arg(long)]
    pub history: PathBuf,

    #[command(flatten)]
    pub peak: PeakArgs,
}

#[derive(Debug, Clone, Args)]
pub struct BandsArgs {
    #[arg(long)]
    pub history: PathBuf,

    /// Comma-separated band multiples.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub multiples: Option<Vec<f64>>,

    #[command(flatten)]
    pub peak: PeakArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ChartArgs {
    #[arg(long)]
    pub history: PathBuf,

    /// Latest snapshot JSON file.
    #[arg(long)]
    pub latest: Option<PathBuf>,

    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub multiples: Option<Vec<f64>>,

    #[command(flatten)]
    pub peak: PeakArgs,
}

#[derive(Debug, Clone, Args)]
pub struct SnapshotArgs {
    #[arg(long)]
    pub latest: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct RatioArgs {
    /// Index closes JSON file (`[{"date", "close"}]`).
    #[arg(long)]
    pub closes: PathBuf,

    /// Aggregate observations JSON file (`[{"date", "value"}]`).
    #[arg(long)]
    pub aggregate: PathBuf,

    #[arg(long)]
    pub billions_per_point: Option<f64>,

    /// Ticker recorded on the latest snapshot.
    #[arg(long)]
    pub source_ticker: Option<String>,

    /// Directory receiving `history.json` and `latest.json`.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    #[arg(long)]
    pub history: PathBuf,

    /// Destination SVG file.
    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = 960.0)]
    pub width: f64,

    #[arg(long, default_value_t = 480.0)]
    pub height: f64,

    /// Data index to highlight with the hover line.
    #[arg(long)]
    pub hover_index: Option<usize>,

    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub multiples: Option<Vec<f64>>,

    #[command(flatten)]
    pub peak: PeakArgs,
}
