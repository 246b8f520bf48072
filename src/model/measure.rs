// src/model/measure.rs
use serde::Serialize;

/// A calculated measure, keyed to its table by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureRecord {
    pub table_name: String,
    pub measure_name: String,
    /// Stored verbatim; never parsed or validated.
    pub expression: String,
}
