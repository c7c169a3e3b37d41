//! # Phase 4: Renumbering
//!
//! Assigns every accepted pairing its identifier in the merged document. The
//! pairings of all accepted files are concatenated in manifest order and the
//! pairing at position `i` receives `start_index + i`. This one formula makes
//! the identifiers unique, contiguous and independent of how phases 2 and 3
//! were scheduled.
//!
//! For each pairing the internal signature `ID`, the file format `ID`, the
//! file format `PUID` (`<prefix>/<id>`) and the file format's
//! `InternalSignatureID` are rewritten. Nothing else is touched.

use log::debug;

use crate::error::{Error, Result};
use crate::signature::SignaturePairing;

/// Executes Phase 4 of the pipeline.
pub fn execute(
    pairings: &[SignaturePairing],
    prefix: &str,
    start_index: u64,
) -> Result<Vec<SignaturePairing>> {
    check_range(start_index, pairings.len())?;
    debug!(
        "renumbering {} pairings from {} with prefix '{}'",
        pairings.len(),
        start_index,
        prefix
    );

    Ok(pairings
        .iter()
        .enumerate()
        .map(|(position, pairing)| pairing.renumbered(start_index + position as u64, prefix))
        .collect())
}

/// Checks that `count` identifiers starting at `start_index` fit in a `u64`.
fn check_range(start_index: u64, count: usize) -> Result<()> {
    let span = (count as u64).saturating_sub(1);
    match start_index.checked_add(span) {
        Some(_) => Ok(()),
        None => Err(Error::IdentifierOverflow { start_index, count }),
    }
}
