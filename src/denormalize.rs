//! Denormalization joiner.
//!
//! ```text
//! tables ──left join (tableName)──▶ measures ──left join (tableName)──▶ columns
//! ```
//!
//! Columns and measures only share the table name, so within one table every
//! measure is paired with every column: `c` columns and `m` measures give
//! `c × m` rows. A side with no entries contributes a single `None` slot, so
//! the table still appears. No deduplication is applied.

use std::collections::HashMap;

use crate::model::{DenormalizedRow, ReportSchema};

/// Join the relations into rows ordered by table, then measure, then column,
/// each in input order.
#[tracing::instrument(skip_all, fields(tables = schema.tables.len()))]
pub fn denormalize(schema: &ReportSchema) -> Vec<DenormalizedRow> {
    let measures = group_by_table(&schema.measures, |m| m.table_name.as_str());
    let columns = group_by_table(&schema.columns, |c| c.table_name.as_str());

    let mut rows = Vec::new();
    for table in &schema.tables {
        let key = table.table_name.as_str();
        let measure_slots = slots(measures.get(key));
        let column_slots = slots(columns.get(key));

        rows.reserve(measure_slots.len() * column_slots.len());
        for measure in &measure_slots {
            for column in &column_slots {
                rows.push(DenormalizedRow::combine(table, *measure, *column));
            }
        }
    }

    tracing::debug!(rows = rows.len(), "denormalized");
    rows
}

fn group_by_table<'a, T>(
    records: &'a [T],
    key: impl Fn(&'a T) -> &'a str,
) -> HashMap<&'a str, Vec<&'a T>> {
    let mut groups: HashMap<&str, Vec<&T>> = HashMap::new();
    for record in records {
        groups.entry(key(record)).or_default().push(record);
    }
    groups
}

/// One slot per record, or a single empty slot for a left join with no match.
fn slots<'a, T>(group: Option<&Vec<&'a T>>) -> Vec<Option<&'a T>> {
    match group {
        Some(records) if !records.is_empty() => records.iter().copied().map(Some).collect(),
        _ => vec![None],
    }
}
