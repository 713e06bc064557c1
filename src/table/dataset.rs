use super::errors::{Result, TableError};

/// Tokenized rows of raw cells, all of the same width.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Dataset {
    /// Takes ownership of `rows`, rejecting ragged input instead of padding it.
    /// The width is taken from the first row.
    pub fn new(rows: Vec<Vec<String>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, actual)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width)
        {
            return Err(TableError::RaggedRow {
                row,
                expected: width,
                actual,
            });
        }
        Ok(Self { rows, width })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of cells per row.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn width_comes_from_rows() -> anyhow::Result<()> {
        let ds = Dataset::new(owned(&[&["a", "b", "c"], &["1", "2", "3"]]))?;
        assert_eq!(ds.width(), 3);
        assert_eq!(ds.len(), 2);
        Ok(())
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Dataset::new(owned(&[&["a", "b"], &["1", "2"], &["3"]])).unwrap_err();
        assert_eq!(
            err,
            TableError::RaggedRow {
                row: 2,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn empty_dataset_has_zero_width() -> anyhow::Result<()> {
        let ds = Dataset::new(Vec::new())?;
        assert!(ds.is_empty());
        assert_eq!(ds.width(), 0);
        Ok(())
    }
}
