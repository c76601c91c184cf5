use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use kharda::{config::DiaryConfig, ingest, record::map_rows, summary};
use std::{io::Write, path::PathBuf};
use tracing::info;

/// Per-day civil/criminal hearing counts as YAML.
#[derive(Parser)]
#[command(author, version, about = "Count hearings per day, split into civil and criminal")]
struct Args {
    /// CSV or JSON exports; glob patterns allowed.
    #[arg(short, long = "input", required = true, num_args = 1..)]
    inputs: Vec<String>,
    /// Restrict to one month, YYYY-MM.
    #[arg(long)]
    month: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => DiaryConfig::load(path)?,
        None => DiaryConfig::default(),
    };

    let rows = ingest::load_inputs(&args.inputs)?;
    let records = map_rows(&rows, &config.aliases, config.case_numbers);
    let mut days = summary::day_summaries(&records);

    if let Some(month) = &args.month {
        let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
            .with_context(|| format!("invalid --month `{}` (expected YYYY-MM)", month))?;
        days = summary::for_month(days, first.year(), first.month());
    }
    info!(days = days.len(), records = records.len(), "summarised");

    // - date: 2024-01-05
    //   weekday: Friday
    //   civil: 1
    //   ...
    let yaml_string = serde_yaml::to_string(&days)?;
    let mut out = std::io::stdout().lock();
    out.write_all(yaml_string.as_bytes())?;
    Ok(())
}
