//! Expression text stored as ordered fragments.
//!
//! Model schemas split long M and DAX scripts into an array of lines. The
//! pieces are one value: they are joined back verbatim, never picked from or
//! deduplicated.

use serde::Deserialize;

/// An expression as it appears in a source document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Fragments {
    /// A single string.
    Text(String),
    /// Ordered pieces of one string.
    Parts(Vec<String>),
}

impl Fragments {
    /// Reconstitute the full text by concatenating with no separator.
    pub fn join(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts.concat(),
        }
    }
}

impl From<&str> for Fragments {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<&str>> for Fragments {
    fn from(parts: Vec<&str>) -> Self {
        Self::Parts(parts.into_iter().map(str::to_string).collect())
    }
}

/// Join an optional expression, falling back to `default` when absent.
pub(crate) fn join_or(fragments: Option<&Fragments>, default: &str) -> String {
    fragments
        .map(Fragments::join)
        .unwrap_or_else(|| default.to_string())
}
