//! Decoding of template archive members.
//!
//! `DataModelSchema` is stored as UTF-16LE, `Connections` as UTF-8; either may
//! start with a byte order mark. Unpacking the archive itself is left to the
//! caller: [`ArchiveMembers::read_dir`] reads members from an extracted
//! directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ingest::archive::{self, CONNECTIONS_MEMBER, MODEL_SCHEMA_MEMBER};
use crate::ingest::{IngestResult, NormalizeOptions};
use crate::model::ReportSchema;

const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Result type for member decoding.
pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("UTF-16 text has an odd byte length ({0})")]
    OddLength(usize),

    #[error("invalid UTF-16 text: {0}")]
    Utf16(#[from] std::string::FromUtf16Error),

    #[error("invalid UTF-8 text: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Decode a raw member into text.
pub fn decode_member(bytes: &[u8]) -> DocumentResult<String> {
    if let Some(rest) = bytes.strip_prefix(&UTF16LE_BOM) {
        return decode_utf16le(rest);
    }
    if looks_like_utf16le(bytes) {
        return decode_utf16le(bytes);
    }

    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    Ok(std::str::from_utf8(bytes)?.to_string())
}

/// ASCII text stored as UTF-16LE has a zero in every second byte.
fn looks_like_utf16le(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] != 0 && bytes[1] == 0
}

fn decode_utf16le(bytes: &[u8]) -> DocumentResult<String> {
    if bytes.len() % 2 != 0 {
        return Err(DocumentError::OddLength(bytes.len()));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let text = String::from_utf16(&units)?;
    Ok(text
        .strip_prefix('\u{FEFF}')
        .map(str::to_string)
        .unwrap_or(text))
}

/// The decoded members an archive inspection needs.
#[derive(Debug, Clone)]
pub struct ArchiveMembers {
    pub report_name: String,
    pub connections: String,
    pub model_schema: String,
}

impl ArchiveMembers {
    /// Read the members from a directory the archive was extracted into.
    ///
    /// The report name is the directory name without a `.pbit`/`.zip` suffix.
    pub fn read_dir(dir: &Path) -> DocumentResult<Self> {
        let file_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            report_name: archive::report_name_from_file_name(&file_name).to_string(),
            connections: read_member(&dir.join(CONNECTIONS_MEMBER))?,
            model_schema: read_member(&dir.join(MODEL_SCHEMA_MEMBER))?,
        })
    }

    pub fn with_report_name(mut self, report_name: impl Into<String>) -> Self {
        self.report_name = report_name.into();
        self
    }

    pub fn normalize(&self, options: &NormalizeOptions) -> IngestResult<ReportSchema> {
        archive::normalize_json(
            &self.connections,
            &self.model_schema,
            &self.report_name,
            options,
        )
    }
}

fn read_member(path: &Path) -> DocumentResult<String> {
    let bytes = fs::read(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_member(&bytes)
}
