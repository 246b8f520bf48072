//! Archive adapter: reads the members of a packaged report template.
//!
//! A template archive carries two JSON members this adapter needs:
//! `Connections` (which published report and dataset the template came from)
//! and `DataModelSchema` (the tabular model).

use serde::Deserialize;

use super::{
    flatten_tables, Fragments, IngestError, IngestResult, NormalizeOptions, RawColumn, RawMeasure,
    TableNode,
};
use crate::model::{Diagnostic, Provenance, ReportSchema};

/// Archive member holding the connection metadata.
pub const CONNECTIONS_MEMBER: &str = "Connections";

/// Archive member holding the model schema.
pub const MODEL_SCHEMA_MEMBER: &str = "DataModelSchema";

const ARCHIVE_EXTENSIONS: [&str; 2] = [".pbit", ".zip"];

// ============================================================================
// Documents
// ============================================================================

/// The `Connections` member.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionsDocument {
    #[serde(default, deserialize_with = "super::nullable_vec")]
    pub remote_artifacts: Vec<RemoteArtifact>,
}

/// A published report the template is linked to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteArtifact {
    #[serde(default)]
    pub dataset_id: Option<String>,
    #[serde(default)]
    pub report_id: Option<String>,
}

impl ConnectionsDocument {
    pub fn from_json(text: &str) -> IngestResult<Self> {
        serde_json::from_str(text).map_err(IngestError::invalid(CONNECTIONS_MEMBER))
    }
}

/// The `DataModelSchema` member.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelSchemaDocument {
    #[serde(default)]
    pub model: Option<ModelSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelSection {
    #[serde(default)]
    pub tables: Option<Vec<SchemaTable>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchemaTable {
    pub name: String,
    #[serde(default, deserialize_with = "super::nullable_vec")]
    pub columns: Vec<RawColumn>,
    #[serde(default, deserialize_with = "super::nullable_vec")]
    pub measures: Vec<RawMeasure>,
    #[serde(default, deserialize_with = "super::nullable_vec")]
    pub partitions: Vec<Partition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Partition {
    /// Storage mode of the partition (`import`, `directQuery`, ...).
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub source: Option<PartitionSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartitionSource {
    #[serde(default)]
    pub expression: Option<Fragments>,
}

impl ModelSchemaDocument {
    pub fn from_json(text: &str) -> IngestResult<Self> {
        serde_json::from_str(text).map_err(IngestError::invalid(MODEL_SCHEMA_MEMBER))
    }

    /// The model's table collection, if the document has one.
    pub fn tables(&self) -> Option<&[SchemaTable]> {
        self.model.as_ref()?.tables.as_deref()
    }
}

impl TableNode for SchemaTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn storage_mode(&self) -> Option<String> {
        self.partitions.first()?.mode.clone()
    }

    fn source_expression(&self) -> Option<String> {
        let source = self.partitions.first()?.source.as_ref()?;
        source.expression.as_ref().map(Fragments::join)
    }

    fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    fn measures(&self) -> &[RawMeasure] {
        &self.measures
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// Normalize a template archive's members.
///
/// Fails with [`IngestError::MalformedArchive`] when the connection metadata
/// lists no remote artifact, or the first one lacks its dataset or report id.
/// A schema without a table collection yields empty relations plus a
/// [`Diagnostic::MissingModelSection`].
#[tracing::instrument(skip_all, fields(report = report_name))]
pub fn normalize(
    connections: &ConnectionsDocument,
    schema: &ModelSchemaDocument,
    report_name: &str,
    options: &NormalizeOptions,
) -> IngestResult<ReportSchema> {
    let provenance = archive_provenance(connections, report_name)?;
    let mut out = ReportSchema::default();

    let Some(tables) = schema.tables() else {
        tracing::warn!("model schema has no table collection");
        out.diagnostics.push(Diagnostic::MissingModelSection);
        return Ok(out);
    };

    flatten_tables(tables, &provenance, options, &mut out);
    tracing::debug!(
        tables = out.tables.len(),
        columns = out.columns.len(),
        measures = out.measures.len(),
        "normalized archive"
    );
    Ok(out)
}

/// Parse both members from text and normalize them.
pub fn normalize_json(
    connections: &str,
    schema: &str,
    report_name: &str,
    options: &NormalizeOptions,
) -> IngestResult<ReportSchema> {
    let connections = ConnectionsDocument::from_json(connections)?;
    let schema = ModelSchemaDocument::from_json(schema)?;
    normalize(&connections, &schema, report_name, options)
}

fn archive_provenance(
    connections: &ConnectionsDocument,
    report_name: &str,
) -> IngestResult<Provenance> {
    let artifact = connections.remote_artifacts.first().ok_or_else(|| {
        IngestError::MalformedArchive("connection metadata lists no remote artifact".to_string())
    })?;

    let dataset_id = artifact.dataset_id.clone().ok_or_else(|| {
        IngestError::MalformedArchive("remote artifact has no DatasetId".to_string())
    })?;
    let report_id = artifact.report_id.clone().ok_or_else(|| {
        IngestError::MalformedArchive("remote artifact has no ReportId".to_string())
    })?;

    Ok(Provenance::Archive {
        dataset_id,
        report_id,
        report_name: report_name.to_string(),
    })
}

/// Report name for an archive file: the file name without its `.pbit` or
/// `.zip` extension.
pub fn report_name_from_file_name(file_name: &str) -> &str {
    ARCHIVE_EXTENSIONS
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))
        .unwrap_or(file_name)
}
