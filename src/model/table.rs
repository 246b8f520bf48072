// src/model/table.rs
use serde::Serialize;

/// Where a report's tables came from.
///
/// The two ingestion paths know different things about the report: a template
/// archive names the published report it was exported from, a workspace scan
/// knows the dataset and the account that configured it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "camelCase")]
pub enum Provenance {
    /// Read from a packaged report archive.
    #[serde(rename_all = "camelCase")]
    Archive {
        dataset_id: String,
        report_id: String,
        report_name: String,
    },
    /// Read from a workspace scan result.
    #[serde(rename_all = "camelCase")]
    Scan {
        dataset_id: Option<String>,
        report_name: String,
        configured_by: Option<String>,
    },
}

impl Provenance {
    pub fn dataset_id(&self) -> Option<&str> {
        match self {
            Self::Archive { dataset_id, .. } => Some(dataset_id),
            Self::Scan { dataset_id, .. } => dataset_id.as_deref(),
        }
    }

    /// Only archives carry a report id; scans identify the report by dataset.
    pub fn report_id(&self) -> Option<&str> {
        match self {
            Self::Archive { report_id, .. } => Some(report_id),
            Self::Scan { .. } => None,
        }
    }

    pub fn report_name(&self) -> &str {
        match self {
            Self::Archive { report_name, .. } | Self::Scan { report_name, .. } => report_name,
        }
    }

    pub fn configured_by(&self) -> Option<&str> {
        match self {
            Self::Archive { .. } => None,
            Self::Scan { configured_by, .. } => configured_by.as_deref(),
        }
    }
}

/// A table of the report's model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecord {
    pub provenance: Provenance,
    /// Unique within one report, not across reports.
    pub table_name: String,
    pub storage_mode: Option<String>,
    /// Query text of the table's first partition.
    pub source_expression: Option<String>,
}
