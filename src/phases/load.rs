//! # Phase 2: Document Loading
//!
//! Reads one manifest entry and turns it into a [`SignatureDocument`].
//!
//! Three outcomes are possible for each file:
//!
//! - the file parses and its root element is `FFSignatureFile`: the document
//!   moves on to pairing;
//! - the file parses but has some other root element:
//!   [`Error::NotASignatureDocument`], which the orchestrator skips silently;
//! - the file cannot be read as text, or is not well-formed XML:
//!   [`Error::MalformedDocument`], which the orchestrator logs before moving on.

use std::path::{Path, PathBuf};

use crate::defaults::ROOT_ELEMENT;
use crate::error::{Error, Result};
use crate::xml::{self, Element};

/// A parsed signature document.
#[derive(Debug, Clone)]
pub struct SignatureDocument {
    /// The file the document was read from.
    pub path: PathBuf,
    /// The `FFSignatureFile` root element.
    pub root: Element,
}

/// Executes Phase 2 of the pipeline for a single file.
pub fn execute(path: &Path) -> Result<SignatureDocument> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::malformed(path, e.to_string()))?;
    parse_document(path, &text)
}

/// Parses `text` as the signature document read from `path`.
pub fn parse_document(path: &Path, text: &str) -> Result<SignatureDocument> {
    let root = xml::parse(text).map_err(|message| Error::malformed(path, message))?;
    if root.name != ROOT_ELEMENT {
        return Err(Error::NotASignatureDocument {
            path: path.to_path_buf(),
            root: root.name,
        });
    }
    Ok(SignatureDocument {
        path: path.to_path_buf(),
        root,
    })
}
