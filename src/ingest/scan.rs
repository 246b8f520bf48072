//! Scan adapter: reads a workspace scan result.
//!
//! The scan nests `workspace → datasets → tables → {columns, measures, source}`.
//! One dataset is selected by name and its tables are exploded into rows.

use serde::Deserialize;
use serde_json::Value;

use super::{
    flatten_tables, Fragments, IngestError, IngestResult, NormalizeOptions, RawColumn, RawMeasure,
    TableNode,
};
use crate::model::{Diagnostic, Provenance, ReportSchema};

const SCAN_DOCUMENT: &str = "scan";

/// Content provider of datasets backed by an imported report.
pub const DEFAULT_CONTENT_PROVIDER: &str = "PbixInImportMode";

/// Name fragment of the usage reports the service generates on its own.
pub const USAGE_METRICS_REPORT: &str = "Usage Metrics Report";

// ============================================================================
// Documents
// ============================================================================

/// Full scan-result envelope as returned by the scanning service.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanResult {
    #[serde(default, deserialize_with = "super::nullable_vec")]
    pub workspaces: Vec<WorkspaceScan>,
}

/// One scanned workspace.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceScan {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable_vec")]
    pub datasets: Vec<ScanDataset>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanDataset {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub content_provider_type: Option<String>,
    #[serde(default)]
    pub configured_by: Option<String>,
    #[serde(default, deserialize_with = "super::nullable_vec")]
    pub tables: Vec<ScanTable>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanTable {
    pub name: String,
    #[serde(default)]
    pub storage_mode: Option<String>,
    #[serde(default, deserialize_with = "super::nullable_vec")]
    pub source: Vec<ScanSource>,
    #[serde(default, deserialize_with = "super::nullable_vec")]
    pub columns: Vec<RawColumn>,
    #[serde(default, deserialize_with = "super::nullable_vec")]
    pub measures: Vec<RawMeasure>,
}

/// A partition source descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanSource {
    #[serde(default)]
    pub expression: Option<Fragments>,
}

impl TableNode for ScanTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn storage_mode(&self) -> Option<String> {
        self.storage_mode.clone()
    }

    fn source_expression(&self) -> Option<String> {
        self.source.first()?.expression.as_ref().map(Fragments::join)
    }

    fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    fn measures(&self) -> &[RawMeasure] {
        &self.measures
    }
}

impl WorkspaceScan {
    /// Parse either a workspace object or a scan-result envelope; for an
    /// envelope the first workspace is used.
    pub fn from_json(text: &str) -> IngestResult<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(IngestError::invalid(SCAN_DOCUMENT))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> IngestResult<Self> {
        if value.get("workspaces").is_none() {
            return serde_json::from_value(value).map_err(IngestError::invalid(SCAN_DOCUMENT));
        }

        let envelope: ScanResult =
            serde_json::from_value(value).map_err(IngestError::invalid(SCAN_DOCUMENT))?;
        envelope.workspaces.into_iter().next().ok_or_else(|| IngestError::InvalidDocument {
            document: SCAN_DOCUMENT,
            source: serde::de::Error::custom("scan result lists no workspace"),
        })
    }

    /// Names of the datasets a caller may offer for selection, in document order.
    pub fn report_names(&self, filter: &ReportFilter) -> Vec<&str> {
        self.datasets
            .iter()
            .filter(|d| filter.accepts(d))
            .map(|d| d.name.as_str())
            .collect()
    }

    /// Datasets carrying the given name.
    pub fn datasets_named<'a>(
        &'a self,
        report_name: &'a str,
    ) -> impl Iterator<Item = &'a ScanDataset> {
        self.datasets.iter().filter(move |d| d.name == report_name)
    }
}

// ============================================================================
// Report listing
// ============================================================================

/// Which scanned datasets count as user-facing reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilter {
    /// Required fragment of the dataset's `contentProviderType`.
    pub content_provider_type: String,
    /// Datasets whose name contains any of these are skipped.
    pub excluded_name_markers: Vec<String>,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self {
            content_provider_type: DEFAULT_CONTENT_PROVIDER.to_string(),
            excluded_name_markers: vec![USAGE_METRICS_REPORT.to_string()],
        }
    }
}

impl ReportFilter {
    pub fn accepts(&self, dataset: &ScanDataset) -> bool {
        let provider_matches = dataset
            .content_provider_type
            .as_deref()
            .is_some_and(|p| p.contains(self.content_provider_type.as_str()));
        provider_matches
            && !self
                .excluded_name_markers
                .iter()
                .any(|marker| dataset.name.contains(marker.as_str()))
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// Normalize the dataset named `report_name`.
///
/// No match is not an error: the result is empty and carries a
/// [`Diagnostic::DatasetNotFound`]. When several datasets share the name the
/// first is used and a [`Diagnostic::AmbiguousDataset`] is recorded.
#[tracing::instrument(skip_all, fields(report = report_name))]
pub fn normalize(
    scan: &WorkspaceScan,
    report_name: &str,
    options: &NormalizeOptions,
) -> ReportSchema {
    let mut out = ReportSchema::default();
    let mut matches = scan.datasets_named(report_name);

    let Some(dataset) = matches.next() else {
        tracing::warn!("no dataset with the selected name");
        out.diagnostics.push(Diagnostic::DatasetNotFound {
            report_name: report_name.to_string(),
        });
        return out;
    };

    let others = matches.count();
    if others > 0 {
        tracing::warn!(matches = others + 1, "several datasets share the selected name");
        out.diagnostics.push(Diagnostic::AmbiguousDataset {
            report_name: report_name.to_string(),
            matches: others + 1,
        });
    }

    let provenance = Provenance::Scan {
        dataset_id: dataset.id.clone(),
        report_name: dataset.name.clone(),
        configured_by: dataset.configured_by.clone(),
    };
    flatten_tables(&dataset.tables, &provenance, options, &mut out);
    tracing::debug!(
        tables = out.tables.len(),
        columns = out.columns.len(),
        measures = out.measures.len(),
        "normalized scan"
    );
    out
}

/// Parse a scan document from text and normalize one dataset.
pub fn normalize_json(
    text: &str,
    report_name: &str,
    options: &NormalizeOptions,
) -> IngestResult<ReportSchema> {
    let scan = WorkspaceScan::from_json(text)?;
    Ok(normalize(&scan, report_name, options))
}
