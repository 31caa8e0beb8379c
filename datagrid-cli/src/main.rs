//! Render a data grid from the command line.
//!
//! Usage:
//!   datagrid --url https://example.org/api/rows -a per-page=25 --page 2
//!   datagrid --file rows.json -a sort=true --sort name:desc
//!   datagrid --file rows.json --filter role=admin --events

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use datagrid::{ConfigError, Grid, HttpSource, LoadError, LoadOutcome, SortDirection};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "datagrid")]
#[command(about = "Load rows into a data grid and print the rendered HTML")]
struct Args {
    /// Endpoint returning the rows
    #[arg(short = 'u', long)]
    url: Option<String>,

    /// JSON file with rows (or a response object) to preload
    #[arg(short = 'f', long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Base for relative URLs
    #[arg(long)]
    base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Grid attribute, `name=value` (repeatable)
    #[arg(short = 'a', long = "attr", value_parser = parse_pair)]
    attributes: Vec<(String, String)>,

    /// Column filter, `field=text` (repeatable)
    #[arg(long = "filter", value_parser = parse_pair)]
    filters: Vec<(String, String)>,

    /// Sort column, `field` or `field:desc`
    #[arg(short = 's', long)]
    sort: Option<String>,

    /// Page to print
    #[arg(short = 'p', long)]
    page: Option<usize>,

    /// Print emitted grid events to stderr
    #[arg(long)]
    events: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log: Option<PathBuf>,

    /// Debug logging, including the grid's own diagnostics
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("loading failed: {0}")]
    Failed(String),
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))
}

fn parse_sort(raw: &str) -> (&str, SortDirection) {
    match raw.rsplit_once(':') {
        Some((field, "desc")) => (field, SortDirection::Descending),
        Some((field, "asc")) => (field, SortDirection::Ascending),
        _ => (raw, SortDirection::Ascending),
    }
}

fn init_logging(args: &Args) {
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let result = match &args.log {
        Some(path) => match File::create(path) {
            Ok(log_file) => WriteLogger::init(level, Config::default(), log_file),
            Err(e) => {
                eprintln!("Cannot create log file {}: {e}", path.display());
                return;
            }
        },
        None => WriteLogger::init(level, Config::default(), std::io::stderr()),
    };
    if let Err(e) = result {
        eprintln!("Failed to initialize logger: {e}");
    }
}

fn read_payload(path: &PathBuf) -> Result<serde_json::Value, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Json {
        path: path.clone(),
        source,
    })
}

async fn run(args: &Args) -> Result<String, CliError> {
    let mut source = HttpSource::new().timeout(Duration::from_secs(args.timeout));
    if let Some(base) = &args.base {
        source = source.base_url(base)?;
    }

    let mut builder = Grid::builder().source(source);
    for (name, value) in &args.attributes {
        builder = builder.attribute(name.as_str(), value.as_str());
    }
    if let Some(url) = &args.url {
        builder = builder.attribute("url", url.as_str());
    }
    if args.verbose {
        builder = builder.attribute("debug", "true");
    }

    let mut grid = builder.build();
    if let Some(path) = &args.file {
        let rows = grid.preload(read_payload(path)?)?;
        log::info!("Preloaded {rows} rows from {}", path.display());
    }

    grid.connect();
    if let LoadOutcome::Failed { message } = grid.first_render().await {
        return Err(CliError::Failed(message));
    }

    for (field, text) in &args.filters {
        grid.set_filter(field, text).await;
    }
    if let Some(sort) = &args.sort {
        let (field, direction) = parse_sort(sort);
        grid.sort_by(field, Some(direction)).await;
    }
    if let Some(page) = args.page {
        grid.goto_page(page).await;
    }

    if args.events {
        for event in grid.drain_events() {
            eprintln!("{}: {event:?}", event.name());
        }
    }
    log::info!(
        "Page {} of {} ({} records)",
        grid.page(),
        grid.total_pages(),
        grid.total_records()
    );
    Ok(grid.to_html())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    if args.url.is_none() && args.file.is_none() {
        eprintln!("Error: one of --url or --file is required");
        return ExitCode::FAILURE;
    }

    match run(&args).await {
        Ok(html) => {
            println!("{html}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
