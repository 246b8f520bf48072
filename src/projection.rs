//! Filtered views over the joined rows.
//!
//! Each view keeps the rows whose fields for that view are all present and
//! drops duplicates, keeping the first occurrence. Applied to the output of
//! the joiner they give back the tables-with-sources, columns and measures
//! relations.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;

use crate::model::DenormalizedRow;

/// A table and the query that populates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSource {
    pub table_name: String,
    pub source_expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnEntry {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub column_type: String,
    pub column_expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureEntry {
    pub table_name: String,
    pub measure_name: String,
    pub measure_expression: String,
}

/// Rows with both a table name and a source expression.
pub fn table_sources(rows: &[DenormalizedRow]) -> Vec<TableSource> {
    distinct(rows.iter().filter_map(|row| {
        Some(TableSource {
            table_name: row.table_name.clone(),
            source_expression: row.source_expression.clone()?,
        })
    }))
}

/// Rows with a column name, data type and column expression.
pub fn columns(rows: &[DenormalizedRow]) -> Vec<ColumnEntry> {
    distinct(rows.iter().filter_map(|row| {
        Some(ColumnEntry {
            table_name: row.table_name.clone(),
            column_name: row.column_name.clone()?,
            data_type: row.data_type.clone()?,
            column_type: row.column_type.clone()?,
            column_expression: row.column_expression.clone()?,
        })
    }))
}

/// Rows with a measure name and expression.
pub fn measures(rows: &[DenormalizedRow]) -> Vec<MeasureEntry> {
    distinct(rows.iter().filter_map(|row| {
        Some(MeasureEntry {
            table_name: row.table_name.clone(),
            measure_name: row.measure_name.clone()?,
            measure_expression: row.measure_expression.clone()?,
        })
    }))
}

fn distinct<T>(items: impl Iterator<Item = T>) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}
