//! Default values and schema names for combiner.
//!
//! This module provides centralized constants used across the pipeline and
//! the CLI, ensuring consistency and avoiding duplication.

use time::format_description::FormatItem;
use time::macros::format_description;

/// Name used in version output and log messages.
pub const APP_NAME: &str = "combiner";

/// Prefix used when composing PUIDs (`<prefix>/<id>`).
///
/// Can be overridden by the `--prefix` CLI flag or the `COMBINER_PREFIX`
/// environment variable.
pub const DEFAULT_PREFIX: &str = "ffdev";

/// First identifier assigned to a merged pairing.
///
/// Can be overridden by the `--start-index` CLI flag or the
/// `COMBINER_START_INDEX` environment variable.
pub const DEFAULT_START_INDEX: u64 = 1;

/// Namespace of the PRONOM signature file schema.
pub const SIGNATURE_FILE_NAMESPACE: &str = "http://www.nationalarchives.gov.uk/pronom/SignatureFile";

/// Value of the `Version` attribute on the merged root element.
pub const SIGNATURE_FILE_VERSION: &str = "1";

/// `DateCreated` layout: `YYYY-MM-DDTHH:MM:SSZ`, always UTC.
pub const UTC_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

// Element and attribute names of the signature file schema.
pub const ROOT_ELEMENT: &str = "FFSignatureFile";
pub const INTERNAL_SIGNATURE_COLLECTION: &str = "InternalSignatureCollection";
pub const INTERNAL_SIGNATURE: &str = "InternalSignature";
pub const FILE_FORMAT_COLLECTION: &str = "FileFormatCollection";
pub const FILE_FORMAT: &str = "FileFormat";
pub const INTERNAL_SIGNATURE_ID: &str = "InternalSignatureID";
pub const ID_ATTRIBUTE: &str = "ID";
pub const PUID_ATTRIBUTE: &str = "PUID";
pub const VERSION_ATTRIBUTE: &str = "Version";
pub const DATE_CREATED_ATTRIBUTE: &str = "DateCreated";
