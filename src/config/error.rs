use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a file into a [`ConfigDocument`](super::ConfigDocument).
///
/// The cache absorbs these into [`CachedDocument::Absent`](super::CachedDocument::Absent).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Why a lookup produced no value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFound {
    #[error("config document is absent or malformed: {0}")]
    DocumentAbsent(PathBuf),

    #[error("key not found: {0}")]
    MissingKey(String),

    #[error("cannot descend into non-table value at: {0}")]
    NotATable(String),
}

/// A leaf value was present but could not be converted.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("expected {expected}, found {found}")]
    Type {
        expected: &'static str,
        found: &'static str,
    },

    #[error("integer {0} cannot be represented exactly as a float")]
    InexactFloat(i64),

    #[error("failed to deserialize value: {0}")]
    Deserialize(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LookupError {
    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}
