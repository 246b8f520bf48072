//! Plain-text outline of a report.
//!
//! This is the text handed to whatever writes the narrative documentation:
//! the report name, its tables, where each table's data comes from and the
//! measures with their formulas.

use crate::model::DenormalizedRow;
use crate::projection;

/// Render the outline for one report's joined rows.
pub fn outline(rows: &[DenormalizedRow]) -> String {
    let report_name = rows.first().map(|r| r.report_name.as_str()).unwrap_or("");
    let sources = projection::table_sources(rows);
    let measures = projection::measures(rows);

    let mut lines = vec![format!("Report: {}", report_name), String::new()];

    lines.push("Tables:".to_string());
    lines.extend(sources.iter().map(|s| s.table_name.clone()));
    lines.push(String::new());

    lines.push("Table sources:".to_string());
    lines.extend(
        sources
            .iter()
            .map(|s| format!("{}: {}", s.table_name, s.source_expression)),
    );
    lines.push(String::new());

    lines.push("Measures:".to_string());
    lines.extend(
        measures
            .iter()
            .map(|m| format!("{}: {}", m.measure_name, m.measure_expression)),
    );

    lines.join("\n")
}
