use reportdoc::ingest::{scan, NormalizeOptions};
use reportdoc::projection::{self, ColumnEntry, MeasureEntry, TableSource};
use reportdoc::ReportSchema;

const WORKSPACE: &str = r#"{"datasets": [{"name": "Sales", "tables": [
    {
        "name": "Orders",
        "source": [{"expression": "Sql.Database(\"srv\", \"sales\")"}],
        "columns": [
            {"name": "OrderId", "dataType": "Int64", "columnType": "Data"},
            {"name": "Amount", "dataType": "Double", "columnType": "Data"},
            {"name": "Net", "dataType": "Double", "columnType": "Calculated", "expression": "[Amount] * 0.9"}
        ],
        "measures": [
            {"name": "Total", "expression": "SUM(Orders[Amount])"},
            {"name": "Net Total", "expression": "SUM(Orders[Net])"}
        ]
    },
    {
        "name": "Targets",
        "source": [{"expression": "Excel.Workbook(File.Contents(\"targets.xlsx\"))"}],
        "measures": [{"name": "Target", "expression": "SUM(Targets[Value])"}]
    },
    {
        "name": "Notes",
        "columns": [{"name": "Text", "dataType": "String"}]
    }
]}]}"#;

fn sales() -> ReportSchema {
    scan::normalize_json(WORKSPACE, "Sales", &NormalizeOptions::default()).unwrap()
}

#[test]
fn test_table_sources_view() {
    let schema = sales();
    let rows = schema.denormalize();

    let expected: Vec<TableSource> = schema
        .tables
        .iter()
        .filter_map(|t| {
            Some(TableSource {
                table_name: t.table_name.clone(),
                source_expression: t.source_expression.clone()?,
            })
        })
        .collect();

    let view = projection::table_sources(&rows);
    assert_eq!(view, expected);
    assert_eq!(view.len(), 2);
}

#[test]
fn test_columns_view_reproduces_relation() {
    let schema = sales();
    let rows = schema.denormalize();

    let expected: Vec<ColumnEntry> = schema
        .columns
        .iter()
        .map(|c| ColumnEntry {
            table_name: c.table_name.clone(),
            column_name: c.column_name.clone(),
            data_type: c.data_type.clone().unwrap(),
            column_type: c.column_type.clone(),
            column_expression: c.expression.clone(),
        })
        .collect();

    assert_eq!(projection::columns(&rows), expected);
}

#[test]
fn test_measures_view_reproduces_relation() {
    let schema = sales();
    let rows = schema.denormalize();

    let expected: Vec<MeasureEntry> = schema
        .measures
        .iter()
        .map(|m| MeasureEntry {
            table_name: m.table_name.clone(),
            measure_name: m.measure_name.clone(),
            measure_expression: m.expression.clone(),
        })
        .collect();

    assert_eq!(projection::measures(&rows), expected);
}

#[test]
fn test_views_of_empty_rows() {
    assert!(projection::table_sources(&[]).is_empty());
    assert!(projection::columns(&[]).is_empty());
    assert!(projection::measures(&[]).is_empty());
}

#[test]
fn test_columns_without_data_type_are_filtered() {
    let doc = r#"{"datasets": [{"name": "R", "tables": [
        {"name": "T", "columns": [{"name": "Typed", "dataType": "String"}, {"name": "Untyped"}]}
    ]}]}"#;
    let rows = scan::normalize_json(doc, "R", &NormalizeOptions::default())
        .unwrap()
        .denormalize();

    let view = projection::columns(&rows);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].column_name, "Typed");
}
