use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a descriptor list from a schema source.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("reading layout {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("layout command failed: {0}")]
    Command(String),
    #[error("decoding layout: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure to read a picked file.
#[derive(Debug, Error)]
pub enum ResourceAccessError {
    #[error("no file selected")]
    NoSelection,
    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal schema/collection issues. Logged, never propagated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldIssue {
    #[error("'{id}': unknown field type '{tag}'")]
    UnknownFieldType { id: String, tag: String },
    #[error("no extraction rule matches '{id}'")]
    ExtractionMismatch { id: String },
}
