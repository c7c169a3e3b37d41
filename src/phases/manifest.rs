//! # Phase 1: Manifest
//!
//! Lists every regular file below the root directory. The resulting order is
//! the only input to identifier assignment, so it has to be the same on every
//! run and every platform: entries are sorted by their full path string, not
//! by `Path` component order and not by directory iteration order.
//!
//! No filtering by extension happens here. Files that are not signature
//! documents drop out in phase 2.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};

/// Executes Phase 1 of the pipeline.
///
/// Returns the sorted paths of all regular files under `root`. Entries the walk
/// cannot read are logged and skipped.
pub fn execute(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::Manifest {
            path: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut manifest = Vec::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        // Symlinked files are listed; symlinked directories are not descended.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        debug!("{}", entry.path().display());
        manifest.push(entry.into_path());
    }

    sort_manifest(&mut manifest);
    Ok(manifest)
}

/// Sorts paths lexicographically by their full path string.
pub fn sort_manifest(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
}
