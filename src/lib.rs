//! # Combiner Library
//!
//! This library merges PRONOM-style signature files into a single signature
//! file. It is designed to be used by the `combiner` command-line tool, which
//! maintainers of format identification signatures use to combine signatures
//! developed in separate files into one file for distribution or for import
//! into DROID.
//!
//! ## Quick Example
//!
//! ```no_run
//! use combiner::phases::orchestrator::{self, MergeOptions, MergeOutcome};
//! use std::path::Path;
//!
//! let options = MergeOptions::default();
//! match orchestrator::execute(Path::new("signatures"), &options).unwrap() {
//!     MergeOutcome::Merged(report) => print!("{}", report.document),
//!     MergeOutcome::Empty => eprintln!("nothing to merge"),
//! }
//! ```
//!
//! ## Core Concepts
//!
//! - **Signature records (`signature`)**: internal signatures, file format
//!   records and the pairings between them.
//! - **Detached XML (`xml`)**: the owned element tree records are stored in,
//!   independent of the parser that produced it.
//! - **Phases (`phases`)**: the pipeline that turns a directory into a merged
//!   document.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator`, which executes:
//!
//! 1.  **Manifest**: List every file under the root, sorted by path.
//! 2.  **Loading**: Parse each file and keep the ones rooted at `FFSignatureFile`.
//! 3.  **Pairing**: Match each internal signature with the file format that
//!     references it. Files that do not pair up one-to-one are rejected.
//! 4.  **Renumbering**: Give the accepted pairings consecutive identifiers from
//!     the start index, in manifest order.
//! 5.  **Assembly**: Build and render the merged signature file.

pub mod defaults;
pub mod error;
pub mod phases;
pub mod signature;
pub mod version;
pub mod xml;
