// src/model/column.rs
use serde::Serialize;

/// A column, keyed to its table by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRecord {
    pub table_name: String,
    pub column_name: String,
    pub data_type: Option<String>,
    /// `"N/A"` when the source declares no column type.
    pub column_type: String,
    /// DAX text for calculated columns, `"N/A"` otherwise.
    pub expression: String,
}
