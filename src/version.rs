//! Version reporting for the `--version` flag.

use crate::defaults::APP_NAME;

/// The crate version, as set in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the line printed by `--version`, e.g. `combiner: 0.1.0`.
pub fn version_string() -> String {
    format!("{}: {}", APP_NAME, VERSION)
}
