//! Error types for content parsing and storage access

use std::io;

use thiserror::Error;

/// Errors raised while turning user-supplied JSON into a content document.
///
/// Import and raw-JSON apply surface these to the user; the startup load path
/// logs them and falls back to the demo document instead.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Malformed JSON, a non-object root, or a value of the wrong type
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Imported bytes were not UTF-8 text
    #[error("File is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The JSON root was an array, string, number or null
    #[error("Expected a JSON object at the document root, found {0}")]
    NotAnObject(&'static str),

    /// Two projects share the same id
    #[error("Duplicate project id: {0}")]
    DuplicateProjectId(String),
}

/// Errors raised by a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading the stored record failed
    #[error("Failed to read key {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    /// Writing the record failed (quota, permissions, missing volume)
    #[error("Failed to write key {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The backend cannot be used at all
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
