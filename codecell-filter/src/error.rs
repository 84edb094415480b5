//! Error types for filter runs

use crate::filter::MIN_API_VERSION;
use thiserror::Error;

/// Errors that can occur while running a filter over a pandoc document.
///
/// The normalizer itself never fails; these cover reading, checking and writing the
/// document around it.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Input is not a pandoc JSON document
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),
    /// Document could not be written back as JSON
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
    /// Document was produced by a pandoc older than pandoc-types 1.21, or by another major version
    #[error(
        "Unsupported pandoc API version {found:?}, expected {}.{} or newer with the same major version",
        MIN_API_VERSION[0],
        MIN_API_VERSION[1]
    )]
    UnsupportedApiVersion { found: Vec<u32> },
    /// Reading input or writing output failed
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
