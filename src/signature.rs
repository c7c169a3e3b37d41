//! # Signature Records
//!
//! The records carried through the merge pipeline:
//!
//! - [`InternalSignature`]: a structural signature (byte-sequence rules) with
//!   its `ID` attribute.
//! - [`FileFormatRecord`]: format metadata with its own `ID`, a `PUID` and an
//!   `InternalSignatureID` child pointing back at an internal signature.
//! - [`SignaturePairing`]: one internal signature matched with the one file
//!   format that references it.
//!
//! Records are immutable. Renumbering builds new records; the byte-sequence
//! body of an internal signature is shared between the parsed record and its
//! renumbered copy.

use std::sync::Arc;

use crate::defaults::{ID_ATTRIBUTE, INTERNAL_SIGNATURE_ID, PUID_ATTRIBUTE};
use crate::xml::{replace_attribute, Element, Node};

/// A structural signature record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalSignature {
    id: String,
    attributes: Vec<(String, String)>,
    body: Arc<[Node]>,
}

impl InternalSignature {
    /// Builds a record from an `InternalSignature` element.
    ///
    /// Returns `None` when the element carries no `ID` attribute.
    pub fn from_element(element: &Element) -> Option<Self> {
        let id = element.attribute(ID_ATTRIBUTE)?.to_string();
        Some(Self {
            id,
            attributes: element.attributes.clone(),
            body: element.children.clone().into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// All attributes in source order, `ID` included.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// The byte-sequence rules, untouched since parsing.
    pub fn body(&self) -> &[Node] {
        &self.body
    }

    /// Returns a copy identified by `id`, sharing this record's body.
    pub fn renumbered(&self, id: u64) -> Self {
        let id = id.to_string();
        Self {
            attributes: replace_attribute(&self.attributes, ID_ATTRIBUTE, &id),
            id,
            body: Arc::clone(&self.body),
        }
    }

    #[cfg(test)]
    pub(crate) fn shares_body_with(&self, other: &InternalSignature) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

/// A file format metadata record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFormatRecord {
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    /// Position in `children` of the first `InternalSignatureID` element.
    signature_ref: Option<usize>,
    signature_ref_count: usize,
}

impl FileFormatRecord {
    pub fn from_element(element: &Element) -> Self {
        let is_reference =
            |child: &Node| matches!(child, Node::Element(e) if e.name == INTERNAL_SIGNATURE_ID);
        Self {
            attributes: element.attributes.clone(),
            children: element.children.clone(),
            signature_ref: element.children.iter().position(is_reference),
            signature_ref_count: element.children.iter().filter(|c| is_reference(c)).count(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute(ID_ATTRIBUTE)
    }

    pub fn puid(&self) -> Option<&str> {
        self.attribute(PUID_ATTRIBUTE)
    }

    /// The referenced internal signature identifier, trimmed.
    pub fn signature_ref(&self) -> Option<String> {
        match self.children.get(self.signature_ref?) {
            Some(Node::Element(element)) => Some(element.text().trim().to_string()),
            _ => None,
        }
    }

    /// Number of `InternalSignatureID` children.
    pub fn signature_ref_count(&self) -> usize {
        self.signature_ref_count
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns a copy with `ID`, `PUID` and the back-reference rewritten for `id`.
    ///
    /// Every other attribute and child is carried over unchanged.
    pub fn renumbered(&self, id: u64, prefix: &str) -> Self {
        let id = id.to_string();
        let attributes = replace_attribute(&self.attributes, ID_ATTRIBUTE, &id);
        let attributes = replace_attribute(&attributes, PUID_ATTRIBUTE, &format!("{prefix}/{id}"));

        let mut children = self.children.clone();
        if let Some(index) = self.signature_ref {
            if let Some(Node::Element(reference)) = children.get_mut(index) {
                reference.children = vec![Node::Text(id)];
            }
        }

        Self {
            attributes,
            children,
            signature_ref: self.signature_ref,
            signature_ref_count: self.signature_ref_count,
        }
    }
}

/// An internal signature and the file format that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePairing {
    pub internal_signature: InternalSignature,
    pub file_format: FileFormatRecord,
}

impl SignaturePairing {
    pub fn new(internal_signature: InternalSignature, file_format: FileFormatRecord) -> Self {
        Self {
            internal_signature,
            file_format,
        }
    }

    /// Returns the pairing renumbered to `id`, with its PUID under `prefix`.
    pub fn renumbered(&self, id: u64, prefix: &str) -> Self {
        Self {
            internal_signature: self.internal_signature.renumbered(id),
            file_format: self.file_format.renumbered(id, prefix),
        }
    }
}
