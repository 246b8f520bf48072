//! Normalized report schema: four relations keyed by table name.

pub mod column;
pub mod measure;
pub mod row;
pub mod table;

pub use column::ColumnRecord;
pub use measure::MeasureRecord;
pub use row::DenormalizedRow;
pub use table::{Provenance, TableRecord};

use std::fmt;

use serde::Serialize;

/// Placeholder for optional text fields the source left out.
pub const NOT_APPLICABLE: &str = "N/A";

/// The normalized relations produced by one report inspection.
///
/// Sources-per-table live on [`TableRecord::source_expression`]; the other
/// three relations reference tables by [`TableRecord::table_name`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSchema {
    pub tables: Vec<TableRecord>,
    pub columns: Vec<ColumnRecord>,
    pub measures: Vec<MeasureRecord>,
    /// Non-fatal findings recorded while ingesting.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ReportSchema {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.columns.is_empty() && self.measures.is_empty()
    }

    /// Columns of one table, in input order.
    pub fn columns_of<'a>(&'a self, table_name: &'a str) -> impl Iterator<Item = &'a ColumnRecord> {
        self.columns.iter().filter(move |c| c.table_name == table_name)
    }

    /// Measures of one table, in input order.
    pub fn measures_of<'a>(
        &'a self,
        table_name: &'a str,
    ) -> impl Iterator<Item = &'a MeasureRecord> {
        self.measures.iter().filter(move |m| m.table_name == table_name)
    }

    /// Join the relations into the wide reporting table.
    pub fn denormalize(&self) -> Vec<DenormalizedRow> {
        crate::denormalize::denormalize(self)
    }
}

/// Something an adapter could not find but did not treat as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// The model schema has no `model.tables` collection.
    MissingModelSection,
    /// No scanned dataset carries the selected report name.
    #[serde(rename_all = "camelCase")]
    DatasetNotFound { report_name: String },
    /// Several scanned datasets carry the selected name; the first was used.
    #[serde(rename_all = "camelCase")]
    AmbiguousDataset { report_name: String, matches: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingModelSection => write!(f, "model schema has no table collection"),
            Self::DatasetNotFound { report_name } => {
                write!(f, "no dataset named '{}' in scan", report_name)
            }
            Self::AmbiguousDataset {
                report_name,
                matches,
            } => write!(
                f,
                "{} datasets named '{}' in scan, using the first",
                matches, report_name
            ),
        }
    }
}
