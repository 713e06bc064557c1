// src/schema/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic kind of a column's values. The date kinds have no parser yet,
/// so inference never yields them.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Hash)]
pub enum DataType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "number+eu")]
    NumberEu,
    #[serde(rename = "number+us")]
    NumberUs,
    #[serde(rename = "date+yyyy-mm-dd")]
    DateIso,
    #[serde(rename = "date+dd/mm/yyyy")]
    DateDayFirst,
    #[serde(rename = "date+mm/dd/yyyy")]
    DateMonthFirst,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::NumberEu => "number+eu",
            DataType::NumberUs => "number+us",
            DataType::DateIso => "date+yyyy-mm-dd",
            DataType::DateDayFirst => "date+dd/mm/yyyy",
            DataType::DateMonthFirst => "date+mm/dd/yyyy",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Functional classification of a column. Opaque to inference.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Identifier,
    Classifier,
    Feature,
    #[default]
    Remark,
}

/// Metadata for one positional column of a dataset.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct Column {
    pub name: String,
    pub role: ColumnRole,
    pub datatype: DataType,
}

impl Column {
    /// Unnamed `remark` column typed as `text`, used before any inference ran.
    pub fn placeholder() -> Self {
        Self {
            name: String::new(),
            role: ColumnRole::Remark,
            datatype: DataType::Text,
        }
    }
}
