pub mod schema;
pub mod table;
pub mod tokenize;
