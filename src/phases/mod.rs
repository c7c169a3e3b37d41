//! Implementation of the phases of a combiner merge run.
//!
//! ## Overview
//!
//! A merge run follows 5 phases:
//! 1. Manifest - Recursively list candidate files under the root, sorted by path
//! 2. Loading - Parse each file and check that it is a signature document
//! 3. Pairing - Match internal signatures with file formats inside each document
//! 4. Renumbering - Assign collision-free identifiers across the whole batch
//! 5. Assembly - Build the merged document and serialize it
//!
//! Phases 2 and 3 work on one file at a time and run in parallel across the
//! manifest. Phase 4 is a single ordered pass over the per-file results, so the
//! identifiers assigned depend only on manifest order.
//!
//! The `orchestrator` module drives the phases end to end.

pub mod assemble;
pub mod load;
pub mod manifest;
pub mod orchestrator;
pub mod pairing;
pub mod renumber;

pub use assemble as phase5;
pub use load as phase2;
pub use manifest as phase1;
pub use pairing as phase3;
pub use renumber as phase4;
