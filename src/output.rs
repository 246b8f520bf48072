//! Rendering of joined rows for the command line.

use serde::Serialize;

use crate::model::DenormalizedRow;
use crate::{projection, summary};

/// Which relation to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The wide joined table.
    #[default]
    Full,
    Tables,
    Columns,
    Measures,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// A pretty-printed JSON array.
    #[default]
    Json,
    /// One JSON object per line.
    JsonLines,
    /// The text outline; ignores the view.
    Summary,
}

/// Render rows in the requested view and format.
pub fn render(rows: &[DenormalizedRow], view: View, format: Format) -> serde_json::Result<String> {
    if format == Format::Summary {
        return Ok(summary::outline(rows));
    }

    match view {
        View::Full => encode(rows, format),
        View::Tables => encode(&projection::table_sources(rows), format),
        View::Columns => encode(&projection::columns(rows), format),
        View::Measures => encode(&projection::measures(rows), format),
    }
}

fn encode<T: Serialize>(items: &[T], format: Format) -> serde_json::Result<String> {
    match format {
        Format::JsonLines => {
            let lines = items
                .iter()
                .map(serde_json::to_string)
                .collect::<serde_json::Result<Vec<_>>>()?;
            Ok(lines.join("\n"))
        }
        _ => serde_json::to_string_pretty(items),
    }
}
