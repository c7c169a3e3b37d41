//! # Phase 3: Collection Extraction and Pairing
//!
//! Locates the `InternalSignatureCollection` and `FileFormatCollection` of a
//! signature document and pairs every internal signature with the file format
//! whose `InternalSignatureID` refers to it.
//!
//! ## Acceptance rules
//!
//! A document is accepted only if its records pair up one-to-one:
//!
//! 1.  Each collection appears exactly once in the document.
//! 2.  Both collections hold the same number of records. This is checked before
//!     any matching is attempted.
//! 3.  Every file format carries at most one `InternalSignatureID`.
//! 4.  Every internal signature has an `ID` and exactly one file format refers
//!     to it.
//!
//! Unmatched records are never dropped from an otherwise accepted file: any
//! violation rejects the whole file with [`Error::PairingMismatch`].
//!
//! Pairings come out in the order the internal signatures appear in the
//! source document.

use std::collections::HashMap;

use crate::defaults::{
    FILE_FORMAT, FILE_FORMAT_COLLECTION, INTERNAL_SIGNATURE, INTERNAL_SIGNATURE_COLLECTION,
};
use crate::error::{Error, Result};
use crate::signature::{FileFormatRecord, InternalSignature, SignaturePairing};
use crate::xml::Element;

use super::load::SignatureDocument;

/// The records found in the two collections of one document.
#[derive(Debug, Clone)]
pub struct Collections {
    pub internal_signatures: Vec<InternalSignature>,
    pub file_formats: Vec<FileFormatRecord>,
}

/// Executes Phase 3 of the pipeline for one document.
pub fn execute(document: &SignatureDocument) -> Result<Vec<SignaturePairing>> {
    let collections = extract(document)?;
    pair(document, collections)
}

/// Extracts the records of both collections from `document`.
pub fn extract(document: &SignatureDocument) -> Result<Collections> {
    let signature_collection = single_collection(document, INTERNAL_SIGNATURE_COLLECTION)?;
    let format_collection = single_collection(document, FILE_FORMAT_COLLECTION)?;

    let internal_signatures = signature_collection
        .child_elements(INTERNAL_SIGNATURE)
        .enumerate()
        .map(|(position, element)| {
            InternalSignature::from_element(element).ok_or_else(|| {
                Error::mismatch(
                    &document.path,
                    format!("internal signature #{} has no ID", position + 1),
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let file_formats = format_collection
        .child_elements(FILE_FORMAT)
        .map(FileFormatRecord::from_element)
        .collect();

    Ok(Collections {
        internal_signatures,
        file_formats,
    })
}

fn single_collection<'a>(document: &'a SignatureDocument, name: &str) -> Result<&'a Element> {
    let found = document.root.descendants_named(name);
    match found.as_slice() {
        [collection] => Ok(*collection),
        _ => Err(Error::mismatch(
            &document.path,
            format!("expected one {}, found {}", name, found.len()),
        )),
    }
}

/// Pairs the records of `collections` one-to-one.
pub fn pair(document: &SignatureDocument, collections: Collections) -> Result<Vec<SignaturePairing>> {
    let Collections {
        internal_signatures,
        file_formats,
    } = collections;

    if internal_signatures.len() != file_formats.len() {
        return Err(Error::mismatch(
            &document.path,
            format!(
                "{} internal signatures, {} file formats",
                internal_signatures.len(),
                file_formats.len()
            ),
        ));
    }

    // Index file formats by the signature they refer to.
    let mut by_reference: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, format) in file_formats.iter().enumerate() {
        if format.signature_ref_count() > 1 {
            return Err(Error::mismatch(
                &document.path,
                format!(
                    "file format #{} refers to {} internal signatures",
                    index + 1,
                    format.signature_ref_count()
                ),
            ));
        }
        if let Some(reference) = format.signature_ref() {
            by_reference.entry(reference).or_default().push(index);
        }
    }

    let mut claimed = vec![false; file_formats.len()];
    let mut pairings = Vec::with_capacity(internal_signatures.len());
    for signature in internal_signatures {
        let matches = by_reference
            .get(signature.id())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let index = match matches {
            [index] => *index,
            _ => {
                return Err(Error::mismatch(
                    &document.path,
                    format!(
                        "internal signature {} is referenced by {} file formats",
                        signature.id(),
                        matches.len()
                    ),
                ))
            }
        };
        // A second signature with the same ID would claim the same format.
        if claimed[index] {
            return Err(Error::mismatch(
                &document.path,
                format!("internal signature ID {} is not unique", signature.id()),
            ));
        }
        claimed[index] = true;
        pairings.push(SignaturePairing::new(signature, file_formats[index].clone()));
    }

    Ok(pairings)
}
