pub mod dataset;
pub mod errors;
pub mod state;

pub use dataset::Dataset;
pub use errors::{Result, TableError};
pub use state::TableState;
