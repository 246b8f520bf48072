use reportdoc::ingest::archive::{self, ConnectionsDocument, ModelSchemaDocument};
use reportdoc::ingest::{IngestError, NormalizeOptions};
use reportdoc::model::{Diagnostic, Provenance, NOT_APPLICABLE};

const CONNECTIONS: &str = r#"{
    "Version": 3,
    "Connections": [],
    "RemoteArtifacts": [
        {"DatasetId": "6f1c2d3e-dataset", "ReportId": "9a8b7c6d-report"},
        {"DatasetId": "ignored", "ReportId": "ignored"}
    ]
}"#;

const SCHEMA: &str = r#"{
    "name": "SemanticModel",
    "compatibilityLevel": 1550,
    "model": {
        "culture": "en-US",
        "tables": [
            {
                "name": "Orders",
                "columns": [
                    {"name": "OrderId", "dataType": "int64", "sourceColumn": "OrderId"},
                    {
                        "name": "Margin",
                        "dataType": "double",
                        "type": "calculated",
                        "expression": ["Orders[Amount]", " - ", "Orders[Cost]"]
                    }
                ],
                "measures": [
                    {"name": "Total Sales", "expression": ["SUM(", "Orders[Amount]", ")"]},
                    {"name": "Order Count", "expression": "COUNTROWS(Orders)"}
                ],
                "partitions": [
                    {
                        "name": "Orders-part",
                        "mode": "import",
                        "source": {
                            "type": "m",
                            "expression": [
                                "let",
                                "    Source = Sql.Database(\"srv\", \"sales\")",
                                "in",
                                "    Source"
                            ]
                        }
                    }
                ]
            },
            {
                "name": "LocalDateTable_0e3f9c1a",
                "columns": [{"name": "Date", "dataType": "dateTime"}],
                "partitions": [{"source": {"type": "calculated", "expression": "Calendar(...)"}}]
            },
            {
                "name": "DateTableTemplate_5b2a",
                "columns": [{"name": "Date", "dataType": "dateTime"}]
            },
            {
                "name": "Region",
                "columns": [{"name": "RegionName", "dataType": "string"}],
                "partitions": [{"source": {"expression": []}}]
            }
        ]
    }
}"#;

fn normalize(connections: &str, schema: &str) -> reportdoc::IngestResult<reportdoc::ReportSchema> {
    archive::normalize_json(connections, schema, "Sales", &NormalizeOptions::default())
}

#[test]
fn test_tables_skip_auto_date_tables() {
    let schema = normalize(CONNECTIONS, SCHEMA).unwrap();

    let names: Vec<&str> = schema.tables.iter().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, vec!["Orders", "Region"]);
    assert!(schema.columns.iter().all(|c| !c.table_name.contains("DateTable")));
    assert!(schema.measures.iter().all(|m| !m.table_name.contains("DateTable")));
    assert!(schema.diagnostics.is_empty());
}

#[test]
fn test_provenance_from_first_remote_artifact() {
    let schema = normalize(CONNECTIONS, SCHEMA).unwrap();

    let expected = Provenance::Archive {
        dataset_id: "6f1c2d3e-dataset".to_string(),
        report_id: "9a8b7c6d-report".to_string(),
        report_name: "Sales".to_string(),
    };
    assert!(schema.tables.iter().all(|t| t.provenance == expected));
}

#[test]
fn test_source_expression_fragments_are_concatenated() {
    let schema = normalize(CONNECTIONS, SCHEMA).unwrap();

    assert_eq!(
        schema.tables[0].source_expression.as_deref(),
        Some("let    Source = Sql.Database(\"srv\", \"sales\")in    Source")
    );
    assert_eq!(schema.tables[0].storage_mode.as_deref(), Some("import"));
    // zero fragments
    assert_eq!(schema.tables[1].source_expression.as_deref(), Some(""));
    assert_eq!(schema.tables[1].storage_mode, None);
}

#[test]
fn test_columns_with_and_without_expression() {
    let schema = normalize(CONNECTIONS, SCHEMA).unwrap();
    let orders: Vec<_> = schema.columns_of("Orders").collect();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].column_name, "OrderId");
    assert_eq!(orders[0].data_type.as_deref(), Some("int64"));
    assert_eq!(orders[0].column_type, NOT_APPLICABLE);
    assert_eq!(orders[0].expression, NOT_APPLICABLE);

    assert_eq!(orders[1].column_type, "calculated");
    assert_eq!(orders[1].expression, "Orders[Amount] - Orders[Cost]");
}

#[test]
fn test_measures_in_declaration_order() {
    let schema = normalize(CONNECTIONS, SCHEMA).unwrap();

    let measures: Vec<(&str, &str)> = schema
        .measures
        .iter()
        .map(|m| (m.measure_name.as_str(), m.expression.as_str()))
        .collect();
    assert_eq!(
        measures,
        vec![
            ("Total Sales", "SUM(Orders[Amount])"),
            ("Order Count", "COUNTROWS(Orders)")
        ]
    );
    assert_eq!(schema.measures_of("Region").count(), 0);
}

#[test]
fn test_empty_remote_artifacts_is_malformed() {
    let err = normalize(r#"{"RemoteArtifacts": []}"#, SCHEMA).unwrap_err();
    assert!(matches!(err, IngestError::MalformedArchive(_)));
    assert!(err.is_malformed_archive());
}

#[test]
fn test_missing_remote_artifacts_is_malformed() {
    let err = normalize(r#"{"Version": 3}"#, SCHEMA).unwrap_err();
    assert!(err.is_malformed_archive());
}

#[test]
fn test_malformed_archive_checked_before_schema() {
    // No partial relations even when the schema is fine.
    let connections = ConnectionsDocument::default();
    let schema = ModelSchemaDocument::from_json(SCHEMA).unwrap();
    let result = archive::normalize(&connections, &schema, "Sales", &NormalizeOptions::default());
    assert!(result.is_err());
}

#[test]
fn test_missing_model_section_is_empty_not_error() {
    let schema = normalize(CONNECTIONS, r#"{"name": "SemanticModel"}"#).unwrap();
    assert!(schema.is_empty());
    assert_eq!(schema.diagnostics, vec![Diagnostic::MissingModelSection]);

    let schema = normalize(CONNECTIONS, r#"{"model": {"culture": "en-US"}}"#).unwrap();
    assert!(schema.is_empty());
    assert_eq!(schema.diagnostics, vec![Diagnostic::MissingModelSection]);
}

#[test]
fn test_empty_table_collection() {
    let schema = normalize(CONNECTIONS, r#"{"model": {"tables": []}}"#).unwrap();
    assert!(schema.is_empty());
    assert!(schema.diagnostics.is_empty());
}

#[test]
fn test_table_without_columns_or_measures() {
    let schema = normalize(CONNECTIONS, r#"{"model": {"tables": [{"name": "Empty", "columns": null}]}}"#)
        .unwrap();
    assert_eq!(schema.tables.len(), 1);
    assert!(schema.columns.is_empty());
    assert!(schema.measures.is_empty());
    assert_eq!(schema.tables[0].source_expression, None);
}

#[test]
fn test_invalid_json_names_the_member() {
    let err = normalize(CONNECTIONS, "{not json").unwrap_err();
    match err {
        IngestError::InvalidDocument { document, .. } => assert_eq!(document, "DataModelSchema"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_custom_date_table_pattern() {
    let options = NormalizeOptions::default()
        .with_date_table_pattern("^Region$")
        .unwrap();
    let schema = archive::normalize_json(CONNECTIONS, SCHEMA, "Sales", &options).unwrap();

    let names: Vec<&str> = schema.tables.iter().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, vec!["Orders", "LocalDateTable_0e3f9c1a", "DateTableTemplate_5b2a"]);
}
