//! Delimited-text tokenizer feeding the inference core.
//!
//! Quoting, escaping and delimiters are handled entirely by the `csv` crate.
//! Blank rows are skipped greedily and every problem is collected per row
//! instead of aborting, so the caller can load the result and let the table
//! state refuse inference when anything went wrong.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::{debug, warn};

use crate::table::{Dataset, TableState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizeOptions {
    pub delimiter: u8,
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// A row the tokenizer could not accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizeError {
    /// 1-based source line, when the reader knows it.
    pub line: Option<u64>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub rows: Vec<Vec<String>>,
    pub errors: Vec<TokenizeError>,
}

impl Tokenized {
    /// Load the rows into a fresh [`TableState`], carrying the error count.
    pub fn into_state(self) -> Result<TableState> {
        let dataset = Dataset::new(self.rows).context("building dataset from tokenized rows")?;
        Ok(TableState::load(dataset, self.errors.len()))
    }
}

/// Split `reader` into rows of raw cells.
///
/// Rows whose cells are all blank are dropped. Rows whose width differs from
/// the first kept row are dropped and reported. I/O failures abort.
pub fn read_rows<R: Read>(reader: R, opts: TokenizeOptions) -> Result<Tokenized> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(opts.delimiter)
        .from_reader(reader);

    let mut out = Tokenized::default();
    let mut width: Option<usize> = None;

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                return Err(e).context("reading delimited input");
            }
            Err(e) => {
                let line = e.position().map(|p| p.line());
                warn!(?line, "tokenize: {}", e);
                out.errors.push(TokenizeError {
                    line,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let line = record.position().map(|p| p.line());
        if record.iter().all(|cell| cell.trim().is_empty()) {
            debug!(?line, "tokenize: skipping blank row");
            continue;
        }

        let expected = *width.get_or_insert(record.len());
        if record.len() != expected {
            warn!(
                ?line,
                "tokenize: row has {} fields, expected {}",
                record.len(),
                expected
            );
            out.errors.push(TokenizeError {
                line,
                message: format!("expected {} fields, got {}", expected, record.len()),
            });
            continue;
        }

        out.rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(
        rows = out.rows.len(),
        errors = out.errors.len(),
        "tokenize: done"
    );
    Ok(out)
}
