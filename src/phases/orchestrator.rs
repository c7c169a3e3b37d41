//! Orchestrator for a complete merge run
//!
//! This module coordinates all phases to provide a clean API for merging a
//! directory of signature files:
//!
//! 1. Build the manifest (Phase 1)
//! 2. Load and pair every manifest entry in parallel (Phases 2 and 3)
//! 3. Concatenate the accepted pairings in manifest order and renumber them
//!    (Phase 4)
//! 4. Assemble and render the merged document (Phase 5)
//!
//! Per-file failures never stop a run. Files that are not signature documents
//! are skipped silently; malformed or mismatched files are logged at error
//! level and contribute nothing. A rejected file consumes no identifiers, so
//! it cannot shift the identifiers of the files around it.

use std::path::{Path, PathBuf};

use log::{debug, error, info};
use rayon::prelude::*;

use super::{phase1, phase2, phase3, phase4, phase5};
use crate::defaults::{DEFAULT_PREFIX, DEFAULT_START_INDEX};
use crate::error::Result;
use crate::signature::SignaturePairing;

/// Settings for one merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Prefix used for PUIDs (`<prefix>/<id>`).
    pub prefix: String,
    /// Identifier given to the first accepted pairing.
    pub start_index: u64,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            start_index: DEFAULT_START_INDEX,
        }
    }
}

/// Terminal state of a merge run.
#[derive(Debug, Clone)]
pub enum MergeOutcome {
    /// No file yielded a pairing; nothing should be written.
    Empty,
    /// At least one pairing was accepted.
    Merged(MergeReport),
}

/// Summary and output of a run that produced a document.
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Number of files whose pairings were accepted.
    pub files_accepted: usize,
    /// Renumbered pairings in output order.
    pub pairings: Vec<SignaturePairing>,
    /// The rendered merged document.
    pub document: String,
}

/// Execute a complete merge run over the files under `root`.
pub fn execute(root: &Path, options: &MergeOptions) -> Result<MergeOutcome> {
    debug!("processing files at: {}", root.display());
    let manifest = phase1::execute(root)?;
    execute_manifest(&manifest, options)
}

/// Execute a merge run over an already built manifest.
///
/// Entries are processed in the order given; callers are expected to pass a
/// manifest sorted by [`phase1::sort_manifest`].
pub fn execute_manifest(manifest: &[PathBuf], options: &MergeOptions) -> Result<MergeOutcome> {
    // `collect` on an indexed parallel iterator keeps manifest order.
    let per_file: Vec<Vec<SignaturePairing>> = manifest
        .par_iter()
        .map(|path| accept_file(path))
        .collect();

    let files_accepted = per_file.iter().filter(|pairings| !pairings.is_empty()).count();
    let accepted: Vec<SignaturePairing> = per_file.into_iter().flatten().collect();

    if accepted.is_empty() {
        info!("no signature files were processed");
        return Ok(MergeOutcome::Empty);
    }
    info!("processed '{}' files", files_accepted);

    let pairings = phase4::execute(&accepted, &options.prefix, options.start_index)?;
    let document = phase5::execute(pairings.clone())?;

    Ok(MergeOutcome::Merged(MergeReport {
        files_accepted,
        pairings,
        document,
    }))
}

/// Loads and pairs one file, logging and discarding per-file failures.
///
/// Returns the file's pairings, or none if the file was rejected.
pub fn accept_file(path: &Path) -> Vec<SignaturePairing> {
    match process_file(path) {
        Ok(pairings) if pairings.is_empty() => {
            error!("cannot process: {}: no internal signatures", path.display());
            Vec::new()
        }
        Ok(pairings) => {
            debug!("accepted {} pairings from {}", pairings.len(), path.display());
            pairings
        }
        Err(e) if e.is_silent() => {
            debug!("skipping {}", e);
            Vec::new()
        }
        Err(e) => {
            error!("cannot process: {}", e);
            Vec::new()
        }
    }
}

/// Loads and pairs one file.
pub fn process_file(path: &Path) -> Result<Vec<SignaturePairing>> {
    let document = phase2::execute(path)?;
    phase3::execute(&document)
}
