#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("no dataset loaded")]
    NoDataset,

    #[error("dataset was tokenized with {count} error(s); load a clean file first")]
    TokenizationErrors { count: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{actual} columns given for a dataset {expected} cells wide")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("column {index} out of range for width {width}")]
    ColumnOutOfRange { index: usize, width: usize },
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;
