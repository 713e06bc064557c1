pub mod derive;
pub mod parsers;
pub mod types;

pub use derive::{derive_types, infer_datatype, tally};
pub use parsers::{CellParser, CellValue, ParseFailure, CELL_PARSERS};
pub use types::{Column, ColumnRole, DataType};
