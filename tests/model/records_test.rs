#[cfg(test)]
mod tests {
    use reportdoc::model::{
        ColumnRecord, Diagnostic, MeasureRecord, Provenance, ReportSchema, TableRecord,
    };

    fn archive_provenance() -> Provenance {
        Provenance::Archive {
            dataset_id: "ds-1".to_string(),
            report_id: "rp-1".to_string(),
            report_name: "Sales".to_string(),
        }
    }

    fn table(name: &str) -> TableRecord {
        TableRecord {
            provenance: archive_provenance(),
            table_name: name.to_string(),
            storage_mode: None,
            source_expression: None,
        }
    }

    fn column(table: &str, name: &str) -> ColumnRecord {
        ColumnRecord {
            table_name: table.to_string(),
            column_name: name.to_string(),
            data_type: Some("string".to_string()),
            column_type: "N/A".to_string(),
            expression: "N/A".to_string(),
        }
    }

    fn measure(table: &str, name: &str) -> MeasureRecord {
        MeasureRecord {
            table_name: table.to_string(),
            measure_name: name.to_string(),
            expression: "1".to_string(),
        }
    }

    #[test]
    fn test_archive_provenance_accessors() {
        let provenance = archive_provenance();
        assert_eq!(provenance.dataset_id(), Some("ds-1"));
        assert_eq!(provenance.report_id(), Some("rp-1"));
        assert_eq!(provenance.report_name(), "Sales");
        assert_eq!(provenance.configured_by(), None);
    }

    #[test]
    fn test_scan_provenance_accessors() {
        let provenance = Provenance::Scan {
            dataset_id: None,
            report_name: "Sales".to_string(),
            configured_by: Some("owner@contoso.com".to_string()),
        };
        assert_eq!(provenance.dataset_id(), None);
        assert_eq!(provenance.report_id(), None);
        assert_eq!(provenance.report_name(), "Sales");
        assert_eq!(provenance.configured_by(), Some("owner@contoso.com"));
    }

    #[test]
    fn test_provenance_serializes_with_origin_tag() {
        let value = serde_json::to_value(archive_provenance()).unwrap();
        assert_eq!(value["origin"], "archive");
        assert_eq!(value["datasetId"], "ds-1");
        assert_eq!(value["reportId"], "rp-1");
    }

    #[test]
    fn test_columns_and_measures_of_table() {
        let schema = ReportSchema {
            tables: vec![table("Orders"), table("Customers")],
            columns: vec![
                column("Orders", "Id"),
                column("Customers", "Name"),
                column("Orders", "Amount"),
            ],
            measures: vec![measure("Orders", "Total")],
            diagnostics: Vec::new(),
        };

        let names: Vec<&str> = schema
            .columns_of("Orders")
            .map(|c| c.column_name.as_str())
            .collect();
        assert_eq!(names, vec!["Id", "Amount"]);
        assert_eq!(schema.measures_of("Customers").count(), 0);
        assert!(!schema.is_empty());
    }

    #[test]
    fn test_default_schema_is_empty() {
        let schema = ReportSchema::default();
        assert!(schema.is_empty());
        assert!(schema.denormalize().is_empty());
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::DatasetNotFound {
            report_name: "Marketing".to_string(),
        };
        assert_eq!(diagnostic.to_string(), "no dataset named 'Marketing' in scan");

        let diagnostic = Diagnostic::AmbiguousDataset {
            report_name: "Sales".to_string(),
            matches: 2,
        };
        assert!(diagnostic.to_string().contains("using the first"));
    }
}
