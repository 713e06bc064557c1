use anyhow::{bail, Context, Result};
use clap::Parser;
use csvtype::{
    schema::{derive::column_cells, tally, Column, DataType},
    tokenize::{read_rows, TokenizeError, TokenizeOptions},
};
use serde::Serialize;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "csvtype")]
#[command(about = "Infer column names and datatypes of delimited text read from stdin")]
struct Args {
    /// Field delimiter (single ASCII character)
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Treat the first row as the header
    #[arg(long)]
    header: bool,

    /// Include per-parser vote counts for every column
    #[arg(long)]
    tally: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Vote {
    datatype: DataType,
    count: usize,
}

#[derive(Serialize)]
struct ColumnReport {
    #[serde(flatten)]
    column: Column,
    #[serde(skip_serializing_if = "Option::is_none")]
    votes: Option<Vec<Vote>>,
}

#[derive(Serialize)]
struct Report {
    header_included: bool,
    rows: usize,
    columns: Vec<ColumnReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<TokenizeError>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) init logging (stderr, stdout is the report) ─────────────
    let default_level = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    if !args.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {:?}", args.delimiter);
    }
    let opts = TokenizeOptions {
        delimiter: args.delimiter as u8,
    };

    // ─── 2) tokenize stdin ──────────────────────────────────────────
    let tokenized = read_rows(io::stdin().lock(), opts)?;
    info!(
        rows = tokenized.rows.len(),
        errors = tokenized.errors.len(),
        "tokenized input"
    );
    let errors = tokenized.errors.clone();

    // ─── 3) load + apply header flag ────────────────────────────────
    let mut state = tokenized.into_state()?;
    if args.header {
        if let Err(e) = state.set_header_included(true) {
            warn!("header toggle rejected: {}", e);
        }
    }

    // ─── 4) report ──────────────────────────────────────────────────
    let data = state.data_rows().unwrap_or_default();
    let columns = state
        .columns()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(idx, column)| ColumnReport {
            column: column.clone(),
            votes: args.tally.then(|| {
                tally(&column_cells(data, idx))
                    .into_iter()
                    .map(|(datatype, count)| Vote { datatype, count })
                    .collect()
            }),
        })
        .collect();

    let report = Report {
        header_included: state.header_included(),
        rows: data.len(),
        columns,
        errors,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serializing report")?
    );

    if state.parse_errors() > 0 {
        bail!("{} row(s) could not be tokenized", state.parse_errors());
    }
    Ok(())
}
