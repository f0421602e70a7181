use crate::rdf::SerializeError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a conversion
///
/// Anomalies inside individual records are not errors; they are collected
/// as diagnostics in the conversion summary.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Input or output file could not be read or written
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not JSON with the four record collections
    #[error("Invalid XPO document: {0}")]
    InvalidDocument(#[source] serde_json::Error),

    /// Configured namespace is not a valid IRI
    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),

    /// Graph could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),
}

/// Convenient Result type using ConvertError
pub type ConvertResult<T> = Result<T, ConvertError>;
