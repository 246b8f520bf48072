// src/model/row.rs
use serde::Serialize;

use super::column::ColumnRecord;
use super::measure::MeasureRecord;
use super::table::TableRecord;

/// One line of the wide reporting table.
///
/// Measure fields are `None` when the table has no measures, column fields
/// are `None` when it has no columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DenormalizedRow {
    pub dataset_id: Option<String>,
    pub report_id: Option<String>,
    pub report_name: String,
    pub configured_by: Option<String>,
    pub table_name: String,
    pub storage_mode: Option<String>,
    pub source_expression: Option<String>,
    pub measure_name: Option<String>,
    pub measure_expression: Option<String>,
    pub column_name: Option<String>,
    pub data_type: Option<String>,
    pub column_type: Option<String>,
    pub column_expression: Option<String>,
}

impl DenormalizedRow {
    pub(crate) fn combine(
        table: &TableRecord,
        measure: Option<&MeasureRecord>,
        column: Option<&ColumnRecord>,
    ) -> Self {
        let provenance = &table.provenance;
        Self {
            dataset_id: provenance.dataset_id().map(str::to_string),
            report_id: provenance.report_id().map(str::to_string),
            report_name: provenance.report_name().to_string(),
            configured_by: provenance.configured_by().map(str::to_string),
            table_name: table.table_name.clone(),
            storage_mode: table.storage_mode.clone(),
            source_expression: table.source_expression.clone(),
            measure_name: measure.map(|m| m.measure_name.clone()),
            measure_expression: measure.map(|m| m.expression.clone()),
            column_name: column.map(|c| c.column_name.clone()),
            data_type: column.and_then(|c| c.data_type.clone()),
            column_type: column.map(|c| c.column_type.clone()),
            column_expression: column.map(|c| c.expression.clone()),
        }
    }

    pub fn has_measure(&self) -> bool {
        self.measure_name.is_some()
    }

    pub fn has_column(&self) -> bool {
        self.column_name.is_some()
    }
}
