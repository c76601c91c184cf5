use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use kharda::{
    config::DiaryConfig,
    ingest,
    report::{
        compile_deferred,
        render::{JsonRenderer, Renderer, TextRenderer},
        CaseType, Compiled, DiaryOptions,
    },
    select::Selection,
};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};
use tokio::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Board {
    Civil,
    Criminal,
    /// Majority of the selected case numbers.
    Auto,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Compile a date-wise hearing diary from spreadsheet exports"
)]
#[command(group(ArgGroup::new("window").required(true).args(["all", "from"])))]
struct Args {
    /// CSV or JSON exports; glob patterns allowed.
    #[arg(short, long = "input", required = true, num_args = 1..)]
    inputs: Vec<String>,
    /// Every record, including rows whose date could not be read.
    #[arg(long)]
    all: bool,
    /// First hearing date, YYYY-MM-DD.
    #[arg(long, requires = "to")]
    from: Option<String>,
    /// Last hearing date, YYYY-MM-DD (inclusive).
    #[arg(long, requires = "from")]
    to: Option<String>,
    #[arg(long, value_enum, default_value_t = Board::Auto)]
    case_type: Board,
    /// Only cases whose number, purpose or date contains this text.
    #[arg(long)]
    search: Option<String>,
    /// YAML diary config.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Output file; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kharda=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // ─── 2) configuration ────────────────────────────────────────────
    let config = match &args.config {
        Some(path) => DiaryConfig::load(path)?,
        None => DiaryConfig::default(),
    };
    let selection = match (&args.from, &args.to) {
        (Some(from), Some(to)) => Selection::parse_range(from, to)?,
        _ => Selection::All,
    };
    let mut options = DiaryOptions::new(selection).with_config(config);
    options.case_type = match args.case_type {
        Board::Civil => Some(CaseType::Civil),
        Board::Criminal => Some(CaseType::Criminal),
        Board::Auto => None,
    };
    if let Some(term) = &args.search {
        options = options.with_search(term.clone());
    }

    // ─── 3) load rows ────────────────────────────────────────────────
    let rows = ingest::load_inputs(&args.inputs)?;
    info!(rows = rows.len(), "records loaded");

    // ─── 4) compile off the runtime thread ───────────────────────────
    let start = Instant::now();
    let report = match compile_deferred(rows, options).await? {
        Compiled::Report(report) => report,
        Compiled::NoRecords => {
            println!("No records selected!");
            return Ok(());
        }
    };
    info!(pages = report.pages.len(), elapsed = ?start.elapsed(), "diary compiled");

    // ─── 5) render ───────────────────────────────────────────────────
    let renderer: Box<dyn Renderer> = match args.format {
        Format::Text => Box::new(TextRenderer::default()),
        Format::Json => Box::new(JsonRenderer),
    };
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    renderer.render(&report, &mut out)?;
    out.flush()?;

    if let Some(path) = &args.output {
        info!(path = %path.display(), "wrote report");
    }
    Ok(())
}
