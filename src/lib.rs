//! # reportdoc
//!
//! Flattens the schema of a Power BI report into a wide, analyzable table.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────┐     ┌───────────────────────────┐
//! │  Template archive members │     │  Workspace scan result    │
//! │  (Connections, Schema)    │     │  (datasets → tables)      │
//! └───────────────────────────┘     └───────────────────────────┘
//!               │ [ingest::archive]               │ [ingest::scan]
//!               └────────────────┬────────────────┘
//!                                ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │   ReportSchema: tables, columns, measures (by table)    │
//! └─────────────────────────────────────────────────────────┘
//!                                │
//!                                ▼ [denormalize]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Vec<DenormalizedRow>                        │
//! └─────────────────────────────────────────────────────────┘
//!                                │
//!                                ▼ [projection, summary, output]
//!                    views, outline text, JSON
//! ```
//!
//! An inspection is a pure transformation of an in-memory document: nothing
//! is shared between runs, so separate reports can be processed in parallel.

pub mod config;
pub mod denormalize;
pub mod document;
pub mod ingest;
pub mod model;
pub mod output;
pub mod projection;
pub mod summary;

pub use ingest::{IngestError, IngestResult, NormalizeOptions};
pub use model::{
    ColumnRecord, DenormalizedRow, Diagnostic, MeasureRecord, Provenance, ReportSchema,
    TableRecord, NOT_APPLICABLE,
};
