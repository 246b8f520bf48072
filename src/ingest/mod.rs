//! Ingestion adapters.
//!
//! Both adapters walk a tree of report elements and emit the same flat
//! relations:
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │ archive (Connections +       │   │ scan (workspace → datasets   │
//! │ DataModelSchema)             │   │ → tables)                    │
//! └──────────────────────────────┘   └──────────────────────────────┘
//!                │                                  │
//!                └───────────┐          ┌───────────┘
//!                            ▼          ▼
//!                  ┌────────────────────────────┐
//!                  │  TableNode visitor          │
//!                  │  tables / columns / measures│
//!                  └────────────────────────────┘
//!                               │
//!                               ▼
//!                         ReportSchema
//! ```
//!
//! Adapters only fail on structural problems (see [`IngestError`]). Missing
//! optional fields become `None` or [`NOT_APPLICABLE`].

pub mod archive;
pub mod fragments;
pub mod scan;

pub use fragments::Fragments;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::model::{
    ColumnRecord, MeasureRecord, Provenance, ReportSchema, TableRecord, NOT_APPLICABLE,
};

/// Pattern matching auto-generated calendar tables
/// (`LocalDateTable_<guid>`, `DateTableTemplate_<guid>`).
pub const DEFAULT_DATE_TABLE_PATTERN: &str = "DateTable";

static DEFAULT_DATE_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_DATE_TABLE_PATTERN).unwrap());

// ============================================================================
// Errors
// ============================================================================

/// Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Structural failures that abort an inspection.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The connection metadata does not identify the published report.
    #[error("malformed archive: {0}")]
    MalformedArchive(String),

    /// A document is not JSON or lacks a required element.
    #[error("invalid {document} document: {source}")]
    InvalidDocument {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl IngestError {
    pub(crate) fn invalid(document: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::InvalidDocument { document, source }
    }

    /// Whether the caller should surface this as a blocking error.
    pub fn is_malformed_archive(&self) -> bool {
        matches!(self, Self::MalformedArchive(_))
    }
}

// ============================================================================
// Options
// ============================================================================

/// Options shared by both adapters.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    date_table_pattern: Regex,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            date_table_pattern: DEFAULT_DATE_TABLE.clone(),
        }
    }
}

impl NormalizeOptions {
    /// Replace the auto-date table pattern.
    pub fn with_date_table_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.date_table_pattern = Regex::new(pattern)?;
        Ok(self)
    }

    pub fn date_table_pattern(&self) -> &str {
        self.date_table_pattern.as_str()
    }

    /// Whether a table name denotes an auto-generated date table.
    pub fn is_date_table(&self, table_name: &str) -> bool {
        self.date_table_pattern.is_match(table_name)
    }
}

// ============================================================================
// Shared element shapes
// ============================================================================

/// A column element. Archives spell the column kind `type`, scans `columnType`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawColumn {
    pub name: String,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default, rename = "type", alias = "columnType")]
    pub column_type: Option<String>,
    #[serde(default)]
    pub expression: Option<Fragments>,
}

/// A measure element.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMeasure {
    pub name: String,
    #[serde(default)]
    pub expression: Option<Fragments>,
}

/// Treat a `null` list like an absent one.
pub(crate) fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============================================================================
// Visitor
// ============================================================================

/// A table node of either source tree.
pub(crate) trait TableNode {
    fn name(&self) -> &str;
    fn storage_mode(&self) -> Option<String>;
    fn source_expression(&self) -> Option<String>;
    fn columns(&self) -> &[RawColumn];
    fn measures(&self) -> &[RawMeasure];
}

/// Project each table node into the three relations.
///
/// Columns and measures go to separate streams tagged with the table name;
/// their counts are independent of each other.
pub(crate) fn flatten_tables<'a, T>(
    tables: impl IntoIterator<Item = &'a T>,
    provenance: &Provenance,
    options: &NormalizeOptions,
    schema: &mut ReportSchema,
) where
    T: TableNode + 'a,
{
    for table in tables {
        let table_name = table.name();
        if options.is_date_table(table_name) {
            tracing::debug!(table = table_name, "skipping auto-date table");
            continue;
        }

        schema.tables.push(TableRecord {
            provenance: provenance.clone(),
            table_name: table_name.to_string(),
            storage_mode: table.storage_mode(),
            source_expression: table.source_expression(),
        });

        schema
            .columns
            .extend(table.columns().iter().map(|c| column_record(table_name, c)));
        schema
            .measures
            .extend(table.measures().iter().map(|m| measure_record(table_name, m)));
    }
}

fn column_record(table_name: &str, column: &RawColumn) -> ColumnRecord {
    if column.column_type.is_none() || column.expression.is_none() {
        tracing::trace!(table = table_name, column = %column.name, "column field absent");
    }
    ColumnRecord {
        table_name: table_name.to_string(),
        column_name: column.name.clone(),
        data_type: column.data_type.clone(),
        column_type: column
            .column_type
            .clone()
            .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        expression: fragments::join_or(column.expression.as_ref(), NOT_APPLICABLE),
    }
}

fn measure_record(table_name: &str, measure: &RawMeasure) -> MeasureRecord {
    MeasureRecord {
        table_name: table_name.to_string(),
        measure_name: measure.name.clone(),
        expression: fragments::join_or(measure.expression.as_ref(), NOT_APPLICABLE),
    }
}
