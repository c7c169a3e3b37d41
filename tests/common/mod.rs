//! Shared test utilities for integration and E2E tests.
//!
//! This module provides signature file fixtures and a temporary directory
//! builder to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_file("a.xml", &signatures::file(&[1]));
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
#[allow(unused_imports)]
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::signatures;
    pub use super::TestFixture;
}

/// Signature file snippets for testing.
#[allow(dead_code)]
pub mod signatures {
    /// Namespace used by PRONOM signature files.
    pub const NAMESPACE: &str = "http://www.nationalarchives.gov.uk/pronom/SignatureFile";

    /// Well-formed XML whose root is not a signature file.
    pub const NOT_A_SIGNATURE_FILE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<NotASignatureFile>
  <Anything/>
</NotASignatureFile>
"#;

    /// Text that is not well-formed XML.
    pub const MALFORMED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<FFSignatureFile>
  <InternalSignatureCollection>
</FFSignatureFile>
"#;

    /// An internal signature with the given ID and a distinguishing byte sequence.
    pub fn internal_signature(id: u32) -> String {
        format!(
            r#"    <InternalSignature ID="{id}" Specificity="Specific">
      <ByteSequence Reference="BOFoffset">
        <SubSequence Position="1" SubSeqMinOffset="0" SubSeqMaxOffset="0">
          <Sequence>CAFE{id:04X}</Sequence>
        </SubSequence>
      </ByteSequence>
    </InternalSignature>
"#
        )
    }

    /// A file format record named `Format <reference>` pointing at `reference`.
    pub fn file_format(id: u32, reference: u32) -> String {
        format!(
            r#"    <FileFormat ID="{id}" Name="Format {reference}" PUID="dev/{id}" Version="1">
      <InternalSignatureID>{reference}</InternalSignatureID>
      <Extension>f{reference}</Extension>
    </FileFormat>
"#
        )
    }

    /// A signature file from explicit collection contents.
    pub fn document(signatures: &[String], formats: &[String]) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<FFSignatureFile xmlns="{NAMESPACE}" Version="1" DateCreated="2020-01-01T00:00:00Z">
  <InternalSignatureCollection>
{}  </InternalSignatureCollection>
  <FileFormatCollection>
{}  </FileFormatCollection>
</FFSignatureFile>
"#,
            signatures.concat(),
            formats.concat()
        )
    }

    /// A valid signature file with one pairing per ID.
    pub fn file(ids: &[u32]) -> String {
        let signatures: Vec<String> = ids.iter().map(|id| internal_signature(*id)).collect();
        let formats: Vec<String> = ids.iter().map(|id| file_format(*id, *id)).collect();
        document(&signatures, &formats)
    }

    /// A signature file with more internal signatures than file formats.
    pub fn mismatched_counts() -> String {
        document(
            &[internal_signature(1), internal_signature(2)],
            &[file_format(1, 1)],
        )
    }
}

/// A test fixture that provides a temporary directory of input files.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_file("a.xml", &signatures::file(&[1]))
///     .with_file("notes.txt", "hello world");
///
/// fixture.command().assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add a binary file with the given path and content.
    pub fn with_binary_file(self, path: &str, content: &[u8]) -> Self {
        self.temp_dir
            .child(path)
            .write_binary(content)
            .expect("Failed to write binary file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a `combiner` command with `--path` pointing at this fixture.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("combiner");
        cmd.env_remove("COMBINER_PREFIX")
            .env_remove("COMBINER_START_INDEX")
            .env_remove("RUST_LOG")
            .arg("--path")
            .arg(self.path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
