//! Header toggle engine.
//!
//! [`TableState`] bundles a loaded dataset with its column metadata and the
//! "first row is header" flag. Toggling the flag is a pure transition that
//! returns a new state; a rejected transition leaves the old one as it was.

use std::sync::Arc;
use tracing::{info, warn};

use super::dataset::Dataset;
use super::errors::{Result, TableError};
use crate::schema::derive::derive_types;
use crate::schema::types::{Column, ColumnRole};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    dataset: Option<Arc<Dataset>>,
    parse_errors: usize,
    columns: Option<Vec<Column>>,
    header_included: bool,
}

impl TableState {
    /// Fresh state for newly tokenized data. Columns are reset and the header
    /// flag cleared; when the tokenizer reported no errors the placeholder
    /// columns are typed straight away over every row.
    pub fn load(dataset: Dataset, parse_errors: usize) -> Self {
        let state = Self {
            dataset: Some(Arc::new(dataset)),
            parse_errors,
            columns: None,
            header_included: false,
        };

        if parse_errors > 0 {
            warn!(
                "load: {} tokenization error(s), inference disabled until a clean load",
                parse_errors
            );
            return state;
        }

        match state.apply_header_toggle(false) {
            Ok(next) => next,
            Err(e) => {
                warn!("load: initial inference failed: {}", e);
                state
            }
        }
    }

    /// Rebuild a caller-held snapshot without re-running inference.
    pub fn restore(dataset: Dataset, columns: Vec<Column>, header_included: bool) -> Result<Self> {
        if columns.len() != dataset.width() {
            return Err(TableError::ColumnCountMismatch {
                expected: dataset.width(),
                actual: columns.len(),
            });
        }
        Ok(Self {
            dataset: Some(Arc::new(dataset)),
            parse_errors: 0,
            columns: Some(columns),
            header_included,
        })
    }

    /// Recompute column names and datatypes for the given header flag.
    ///
    /// With `included == false` every column is named `Column <n>` and all
    /// rows are data. With `included == true` names come from row 0 and the
    /// remaining rows are data. Roles and column positions carry over.
    pub fn apply_header_toggle(&self, included: bool) -> Result<Self> {
        let dataset = self.dataset.as_ref().ok_or(TableError::NoDataset)?;
        if self.parse_errors > 0 {
            return Err(TableError::TokenizationErrors {
                count: self.parse_errors,
            });
        }

        let width = dataset.width();
        let mut columns = match &self.columns {
            Some(existing) if existing.len() != width => {
                return Err(TableError::ColumnCountMismatch {
                    expected: width,
                    actual: existing.len(),
                });
            }
            Some(existing) => existing.clone(),
            None => vec![Column::placeholder(); width],
        };

        let data = effective_rows(dataset, included);
        if included {
            if let Some(header) = dataset.rows().first() {
                for (column, name) in columns.iter_mut().zip(header) {
                    column.name = name.clone();
                }
            }
        } else {
            for (i, column) in columns.iter_mut().enumerate() {
                column.name = format!("Column {}", i + 1);
            }
        }

        derive_types(&mut columns, data);

        info!(
            header_included = included,
            columns = columns.len(),
            rows = data.len(),
            "header toggle applied"
        );

        Ok(Self {
            dataset: Some(Arc::clone(dataset)),
            parse_errors: 0,
            columns: Some(columns),
            header_included: included,
        })
    }

    /// In-place form of [`apply_header_toggle`](Self::apply_header_toggle).
    pub fn set_header_included(&mut self, included: bool) -> Result<()> {
        match self.apply_header_toggle(included) {
            Ok(next) => {
                *self = next;
                Ok(())
            }
            Err(e) => {
                warn!("set_header_included({}) rejected: {}", included, e);
                Err(e)
            }
        }
    }

    /// Assign a role from an external classifier.
    pub fn set_role(&mut self, index: usize, role: ColumnRole) -> Result<()> {
        let columns = self.columns.as_mut().ok_or(TableError::NoDataset)?;
        let width = columns.len();
        let column = columns
            .get_mut(index)
            .ok_or(TableError::ColumnOutOfRange { index, width })?;
        column.role = role;
        Ok(())
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_deref()
    }

    pub fn parse_errors(&self) -> usize {
        self.parse_errors
    }

    pub fn header_included(&self) -> bool {
        self.header_included
    }

    /// Column metadata, once inference has run.
    pub fn columns(&self) -> Option<&[Column]> {
        self.columns.as_deref()
    }

    /// Rows a renderer should show: the header row is left out when
    /// `header_included` is set.
    pub fn data_rows(&self) -> Option<&[Vec<String>]> {
        self.columns.as_ref()?;
        self.dataset
            .as_deref()
            .map(|ds| effective_rows(ds, self.header_included))
    }
}

fn effective_rows(dataset: &Dataset, header_included: bool) -> &[Vec<String>] {
    let rows = dataset.rows();
    if header_included {
        rows.get(1..).unwrap_or(&[])
    } else {
        rows
    }
}
