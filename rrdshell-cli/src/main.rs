//! CLI for the rrdshell rrdtool interface.
//!
//! Provides commands for inspecting, querying, creating, and updating RRD
//! files through the rrdtool executable.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use clap::{Parser, Subcommand, ValueEnum};
use rrdshell::{ConsolidationFn, FetchResult, InfoRecord, InfoValue, RrdConfig, RrdTool};
use tracing_subscriber::EnvFilter;

/// rrdshell — Typed front end for the rrdtool round-robin database engine.
#[derive(Parser)]
#[command(name = "rrdshell", version, about)]
struct Cli {
    /// Path to the rrdtool executable (defaults to $RRDTOOL_PATH, then `rrdtool`).
    #[arg(long, global = true)]
    rrdtool: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the rrdtool version banner.
    Version,

    /// Display per data source metadata of an RRD file.
    Info {
        /// Path to the RRD file.
        file: PathBuf,
    },

    /// Fetch consolidated samples from an RRD file.
    Fetch {
        /// Path to the RRD file.
        file: PathBuf,

        /// Consolidation function: AVERAGE, MIN, MAX or LAST.
        #[arg(long, default_value = "AVERAGE")]
        cf: ConsolidationFn,

        /// Start of the window as a Unix timestamp (defaults to end minus range).
        #[arg(long, allow_negative_numbers = true)]
        start: Option<i64>,

        /// End of the window as a Unix timestamp (defaults to now).
        #[arg(long, allow_negative_numbers = true)]
        end: Option<i64>,

        /// Window length when --start is omitted (e.g., "1h", "30m", "7d").
        #[arg(long, default_value = "1h")]
        range: String,

        /// Seconds per value; omitted lets rrdtool use the archive's step.
        #[arg(long)]
        resolution: Option<u64>,
    },

    /// Create a new RRD file.
    Create {
        /// Path to the RRD file.
        file: PathBuf,

        /// Data source definition, e.g. DS:temp:GAUGE:600:U:U (repeatable).
        #[arg(long = "ds")]
        data_sources: Vec<String>,

        /// Archive definition, e.g. RRA:AVERAGE:0.5:1:1200 (repeatable).
        #[arg(long = "rra")]
        archives: Vec<String>,
    },

    /// Append values to an RRD file.
    Update {
        /// Path to the RRD file.
        file: PathBuf,

        /// Values as timestamp:value[:value...], e.g. N:21.5.
        #[arg(required = true)]
        values: Vec<String>,
    },
}

/// Output format for command results.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text (CSV for fetch).
    Text,
    /// JSON.
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = cli.rrdtool.map_or_else(RrdConfig::from_env, RrdConfig::with_path);
    let rrd = RrdTool::new(config);
    let format = cli.format;

    let result = match cli.command {
        Commands::Version => cmd_version(&rrd, format).await,
        Commands::Info { file } => cmd_info(&rrd, &file, format).await,
        Commands::Fetch {
            file,
            cf,
            start,
            end,
            range,
            resolution,
        } => cmd_fetch(&rrd, &file, cf, start, end, &range, resolution, format).await,
        Commands::Create {
            file,
            data_sources,
            archives,
        } => cmd_create(&rrd, &file, &data_sources, &archives).await,
        Commands::Update { file, values } => cmd_update(&rrd, &file, &values).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Implements `rrdshell version`.
async fn cmd_version(rrd: &RrdTool, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let version = rrd.version().await?;

    match format {
        OutputFormat::Text => println!("{version}"),
        OutputFormat::Json => println!("{}", serde_json::json!({ "version": version })),
    }

    Ok(())
}

/// Implements `rrdshell info <file>`.
async fn cmd_info(
    rrd: &RrdTool,
    file: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let info = rrd.info(file).await?;

    match format {
        OutputFormat::Text => print!("{}", render_info(file, &info)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
    }

    Ok(())
}

/// Implements `rrdshell fetch <file>`.
#[allow(clippy::too_many_arguments)]
async fn cmd_fetch(
    rrd: &RrdTool,
    file: &Path,
    cf: ConsolidationFn,
    start: Option<i64>,
    end: Option<i64>,
    range: &str,
    resolution: Option<u64>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let end = end.unwrap_or_else(|| rrdshell::unix_time(SystemTime::now()));
    let start = match start {
        Some(start) => start,
        None => end.saturating_sub(parse_duration(range)?),
    };

    let result = rrd.fetch(file, cf, start, end, resolution).await?;

    match format {
        OutputFormat::Text => print!("{}", render_csv(&result)),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "file": file.display().to_string(),
                "cf": cf,
                "start": start,
                "end": end,
                "headers": result.headers,
                "rows": result.rows,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Implements `rrdshell create <file>`.
async fn cmd_create(
    rrd: &RrdTool,
    file: &Path,
    data_sources: &[String],
    archives: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    rrd.create(file, data_sources, archives).await?;
    tracing::info!(file = %file.display(), "created");
    Ok(())
}

/// Implements `rrdshell update <file> <values>...`.
async fn cmd_update(
    rrd: &RrdTool,
    file: &Path,
    values: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    rrd.update(file, values).await?;
    tracing::info!(file = %file.display(), count = values.len(), "updated");
    Ok(())
}

/// Renders info output as an indented listing.
fn render_info(file: &Path, info: &InfoRecord) -> String {
    let mut out = format!("File: {}\nData sources: {}\n", file.display(), info.len());

    for ds in info.data_sources() {
        out.push_str(&format!("\n  {}\n", ds.name()));
        for (attribute, value) in ds.attributes() {
            let value = match value {
                InfoValue::Number(n) => n.to_string(),
                InfoValue::Text(s) => format!("\"{s}\""),
            };
            out.push_str(&format!("    {attribute} = {value}\n"));
        }
    }

    out
}

/// Renders fetch output as CSV. Missing samples are left empty.
fn render_csv(result: &FetchResult) -> String {
    let mut out = result.headers.join(",");
    out.push('\n');

    for row in &result.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|v| if v.is_nan() { String::new() } else { v.to_string() })
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    out
}

/// Parses a human-readable duration string (e.g., "1h", "30m", "7d") to seconds.
fn parse_duration(s: &str) -> Result<i64, Box<dyn std::error::Error>> {
    let s = s.trim();
    let Some((unit_start, _)) = s.char_indices().last() else {
        return Err("Empty duration string".into());
    };

    let (num_str, unit) = s.split_at(unit_start);
    let num: u64 = num_str.parse()?;

    let multiplier = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86400,
        _ => return Err(format!("Unknown duration unit: '{unit}'. Use s, m, h, or d.").into()),
    };

    let secs = num
        .checked_mul(multiplier)
        .and_then(|secs| i64::try_from(secs).ok())
        .ok_or("duration too large")?;

    Ok(secs)
}
