//! # Error Handling
//!
//! This module defines the centralized error type for the `combiner` library.
//! It uses the `thiserror` library to create an `Error` enum covering every
//! failure the merge pipeline can run into.
//!
//! Errors fall into two groups:
//!
//! - **Per-file errors** (`NotASignatureDocument`, `MalformedDocument`,
//!   `PairingMismatch`): raised while loading or pairing a single input file.
//!   The orchestrator logs them (or, for `NotASignatureDocument`, ignores them)
//!   and moves on to the next file. They never abort a run.
//! - **Run errors** (`Manifest`, `IdentifierOverflow`, `Serialization`, `Io`):
//!   raised before any file is processed or while producing the output. These
//!   are returned to the caller.
//!
//! A run that accepts no file at all is not an error; see
//! [`crate::phases::orchestrator::MergeOutcome::Empty`].

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for combiner operations
#[derive(Error, Debug)]
pub enum Error {
    /// The root element of the file is not `FFSignatureFile`.
    ///
    /// Directories may hold arbitrary files, so this is skipped silently.
    #[error("Not a signature document: {} (root element <{root}>)", path.display())]
    NotASignatureDocument { path: PathBuf, root: String },

    /// The file could not be read as text or is not well-formed XML.
    #[error("Malformed document: {}: {message}", path.display())]
    MalformedDocument { path: PathBuf, message: String },

    /// The internal signatures and file formats of a document do not pair up
    /// one-to-one.
    #[error("Pairing mismatch: {}: {message}", path.display())]
    PairingMismatch { path: PathBuf, message: String },

    /// The root directory cannot be scanned.
    #[error("Cannot build manifest for {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// Assigning identifiers from the configured start index would overflow.
    #[error("Identifier overflow: start index {start_index} cannot number {count} pairings")]
    IdentifierOverflow { start_index: u64, count: usize },

    /// The merged document could not be rendered.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(path: &Path, message: impl Into<String>) -> Self {
        Error::MalformedDocument {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn mismatch(path: &Path, message: impl Into<String>) -> Self {
        Error::PairingMismatch {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Returns true for failures that are skipped without logging.
    pub fn is_silent(&self) -> bool {
        matches!(self, Error::NotASignatureDocument { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
