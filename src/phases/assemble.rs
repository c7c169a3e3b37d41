//! # Phase 5: Assembly and Serialization
//!
//! Builds the merged signature file from the renumbered pairings and renders
//! it as text.
//!
//! ## Document shape
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <FFSignatureFile xmlns="http://www.nationalarchives.gov.uk/pronom/SignatureFile" Version="1" DateCreated="2024-01-01T00:00:00Z">
//!   <InternalSignatureCollection>
//!     <InternalSignature ID="1">...</InternalSignature>
//!   </InternalSignatureCollection>
//!   <FileFormatCollection>
//!     <FileFormat ID="1" PUID="ffdev/1">...</FileFormat>
//!   </FileFormatCollection>
//! </FFSignatureFile>
//! ```
//!
//! Internal signatures and file formats appear in pairing order. Every element
//! is placed in the signature file namespace, whatever namespace (if any) its
//! source file used.
//!
//! ## Rendering
//!
//! `xot` serializes the tree with an XML declaration, UTF-8 encoding and two
//! space indentation. Blank lines are removed from the result so that the text
//! is stable under version control. No validation happens here.

use std::fs;
use std::path::Path;

use log::info;
use time::OffsetDateTime;
use xot::output::xml::{Declaration, Parameters};
use xot::output::Indentation;
use xot::{NamespaceId, Xot};

use crate::defaults::{
    DATE_CREATED_ATTRIBUTE, FILE_FORMAT, FILE_FORMAT_COLLECTION, INTERNAL_SIGNATURE,
    INTERNAL_SIGNATURE_COLLECTION, ROOT_ELEMENT, SIGNATURE_FILE_NAMESPACE, SIGNATURE_FILE_VERSION,
    UTC_TIME_FORMAT, VERSION_ATTRIBUTE,
};
use crate::error::{Error, Result};
use crate::signature::SignaturePairing;
use crate::xml::Node;

/// The merged signature file, ready to be rendered.
#[derive(Debug, Clone)]
pub struct MergedDocument {
    created: String,
    pairings: Vec<SignaturePairing>,
}

/// Executes Phase 5 of the pipeline.
///
/// Stamps the document with the current UTC time and returns the rendered text.
pub fn execute(pairings: Vec<SignaturePairing>) -> Result<String> {
    info!("processing: '{}' items for a signature file", pairings.len());
    MergedDocument::new(pairings)?.to_xml()
}

/// Returns the current UTC time in `DateCreated` format.
pub fn utc_timestamp_now() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(UTC_TIME_FORMAT)
        .map_err(serialization_error)
}

impl MergedDocument {
    /// Creates a document stamped with the current UTC time.
    pub fn new(pairings: Vec<SignaturePairing>) -> Result<Self> {
        Ok(Self::with_created(pairings, utc_timestamp_now()?))
    }

    /// Creates a document with a fixed `DateCreated` value.
    pub fn with_created(pairings: Vec<SignaturePairing>, created: impl Into<String>) -> Self {
        Self {
            created: created.into(),
            pairings,
        }
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn pairings(&self) -> &[SignaturePairing] {
        &self.pairings
    }

    /// Renders the document as pretty-printed XML with a declaration.
    pub fn to_xml(&self) -> Result<String> {
        let mut xot = Xot::new();
        // Parsing the root lets xot record the default namespace declaration.
        let skeleton = format!(r#"<{ROOT_ELEMENT} xmlns="{SIGNATURE_FILE_NAMESPACE}"/>"#);
        let document = xot.parse(&skeleton).map_err(serialization_error)?;
        let root = xot.document_element(document).map_err(serialization_error)?;
        let namespace = xot.add_namespace(SIGNATURE_FILE_NAMESPACE);

        let version = xot.add_name(VERSION_ATTRIBUTE);
        let created = xot.add_name(DATE_CREATED_ATTRIBUTE);
        xot.attributes_mut(root)
            .insert(version, SIGNATURE_FILE_VERSION.to_string());
        xot.attributes_mut(root).insert(created, self.created.clone());

        let signatures = new_element(&mut xot, namespace, INTERNAL_SIGNATURE_COLLECTION, &[]);
        xot.append(root, signatures).map_err(serialization_error)?;
        for pairing in &self.pairings {
            let signature = &pairing.internal_signature;
            let node = new_element(&mut xot, namespace, INTERNAL_SIGNATURE, signature.attributes());
            append_children(&mut xot, namespace, node, signature.body())?;
            xot.append(signatures, node).map_err(serialization_error)?;
        }

        let formats = new_element(&mut xot, namespace, FILE_FORMAT_COLLECTION, &[]);
        xot.append(root, formats).map_err(serialization_error)?;
        for pairing in &self.pairings {
            let format = &pairing.file_format;
            let node = new_element(&mut xot, namespace, FILE_FORMAT, format.attributes());
            append_children(&mut xot, namespace, node, format.children())?;
            xot.append(formats, node).map_err(serialization_error)?;
        }

        let parameters = Parameters {
            indentation: Some(Indentation::default()),
            declaration: Some(Declaration {
                encoding: Some("UTF-8".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let rendered = xot
            .serialize_xml_string(parameters, document)
            .map_err(serialization_error)?;
        Ok(strip_blank_lines(&rendered))
    }
}

fn new_element(
    xot: &mut Xot,
    namespace: NamespaceId,
    name: &str,
    attributes: &[(String, String)],
) -> xot::Node {
    let name = xot.add_name_ns(name, namespace);
    let node = xot.new_element(name);
    for (key, value) in attributes {
        let key = xot.add_name(key);
        xot.attributes_mut(node).insert(key, value.clone());
    }
    node
}

fn append_children(
    xot: &mut Xot,
    namespace: NamespaceId,
    parent: xot::Node,
    children: &[Node],
) -> Result<()> {
    for child in children {
        let node = match child {
            Node::Element(element) => {
                let node = new_element(xot, namespace, &element.name, &element.attributes);
                append_children(xot, namespace, node, &element.children)?;
                node
            }
            Node::Text(text) => xot.new_text(text),
            Node::Comment(comment) => xot.new_comment(comment),
        };
        xot.append(parent, node).map_err(serialization_error)?;
    }
    Ok(())
}

/// Drops whitespace-only lines and terminates the text with a newline.
pub fn strip_blank_lines(text: &str) -> String {
    let mut stripped = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    stripped.push('\n');
    stripped
}

/// Writes a rendered document to `path`, creating parent directories as needed.
pub fn write(rendered: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, rendered)?;
    Ok(())
}

fn serialization_error(e: impl std::fmt::Display) -> Error {
    Error::Serialization {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{FileFormatRecord, InternalSignature};
    use crate::xml::{self, Element};
    use tempfile::TempDir;

    const CREATED: &str = "2024-01-02T03:04:05Z";

    fn pairing(id: u64, name: &str) -> SignaturePairing {
        let signature = xml::parse(&format!(
            r#"<InternalSignature ID="{id}" Specificity="Specific">
                 <ByteSequence Reference="BOFoffset">
                   <SubSequence Position="1" SubSeqMinOffset="0" SubSeqMaxOffset="0">
                     <Sequence>CAFEBABE</Sequence>
                   </SubSequence>
                 </ByteSequence>
               </InternalSignature>"#
        ))
        .unwrap();
        let format = xml::parse(&format!(
            r#"<FileFormat ID="{id}" Name="{name}" PUID="ffdev/{id}">
                 <InternalSignatureID>{id}</InternalSignatureID>
                 <Extension>bin</Extension>
               </FileFormat>"#
        ))
        .unwrap();
        SignaturePairing::new(
            InternalSignature::from_element(&signature).unwrap(),
            FileFormatRecord::from_element(&format),
        )
    }

    fn collection<'a>(root: &'a Element, name: &str) -> &'a Element {
        root.child_elements(name).next().unwrap()
    }

    #[test]
    fn test_to_xml_document_shape() {
        let document = MergedDocument::with_created(vec![pairing(1, "One"), pairing(2, "Two")], CREATED);
        let rendered = document.to_xml().unwrap();

        assert!(rendered.starts_with("<?xml"));
        assert!(rendered.lines().next().unwrap().contains("UTF-8"));
        assert!(rendered.contains(r#"xmlns="http://www.nationalarchives.gov.uk/pronom/SignatureFile""#));

        let root = xml::parse(&rendered).unwrap();
        assert_eq!(root.name, "FFSignatureFile");
        assert_eq!(root.attribute("Version"), Some("1"));
        assert_eq!(root.attribute("DateCreated"), Some(CREATED));

        let names: Vec<&str> = root
            .children
            .iter()
            .filter_map(|child| match child {
                Node::Element(element) => Some(element.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["InternalSignatureCollection", "FileFormatCollection"]);

        let signature_ids: Vec<&str> = collection(&root, "InternalSignatureCollection")
            .child_elements("InternalSignature")
            .filter_map(|e| e.attribute("ID"))
            .collect();
        assert_eq!(signature_ids, vec!["1", "2"]);

        let format_names: Vec<&str> = collection(&root, "FileFormatCollection")
            .child_elements("FileFormat")
            .filter_map(|e| e.attribute("Name"))
            .collect();
        assert_eq!(format_names, vec!["One", "Two"]);
    }

    #[test]
    fn test_to_xml_carries_substructure() {
        let source = pairing(3, "Three");
        let rendered = MergedDocument::with_created(vec![source.clone()], CREATED)
            .to_xml()
            .unwrap();
        let root = xml::parse(&rendered).unwrap();

        let signature = collection(&root, "InternalSignatureCollection")
            .child_elements("InternalSignature")
            .next()
            .unwrap();
        assert_eq!(signature.children.as_slice(), source.internal_signature.body());

        let format = collection(&root, "FileFormatCollection")
            .child_elements("FileFormat")
            .next()
            .unwrap();
        assert_eq!(format.children.as_slice(), source.file_format.children());
    }

    #[test]
    fn test_to_xml_has_no_blank_lines_and_two_space_indent() {
        let rendered = MergedDocument::with_created(vec![pairing(1, "One")], CREATED)
            .to_xml()
            .unwrap();

        assert!(rendered.lines().all(|line| !line.trim().is_empty()));
        assert!(rendered.ends_with('\n'));
        let collection_line = rendered
            .lines()
            .find(|line| line.contains("<InternalSignatureCollection"))
            .unwrap();
        assert!(collection_line.starts_with("  <"));
        assert!(!collection_line.starts_with("   "));
    }

    #[test]
    fn test_to_xml_is_deterministic() {
        let first = MergedDocument::with_created(vec![pairing(1, "One")], CREATED)
            .to_xml()
            .unwrap();
        let second = MergedDocument::with_created(vec![pairing(1, "One")], CREATED)
            .to_xml()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_to_xml_escapes_text() {
        let signature = Element::new("InternalSignature").with_attribute("ID", "1");
        let format = Element::new("FileFormat")
            .with_attribute("ID", "1")
            .with_attribute("Name", "Q&A <draft>")
            .with_child(Node::Element(
                Element::new("InternalSignatureID").with_child(Node::Text("1".to_string())),
            ))
            .with_child(Node::Element(
                Element::new("Description").with_child(Node::Text("a < b & c".to_string())),
            ));
        let pairing = SignaturePairing::new(
            InternalSignature::from_element(&signature).unwrap(),
            FileFormatRecord::from_element(&format),
        );

        let rendered = MergedDocument::with_created(vec![pairing], CREATED)
            .to_xml()
            .unwrap();
        assert!(rendered.contains("Q&amp;A &lt;draft"));
        assert!(rendered.contains("a &lt; b &amp; c"));

        let root = xml::parse(&rendered).unwrap();
        let format = collection(&root, "FileFormatCollection")
            .child_elements("FileFormat")
            .next()
            .unwrap();
        assert_eq!(format.attribute("Name"), Some("Q&A <draft>"));
        let description = format.child_elements("Description").next().unwrap();
        assert_eq!(description.text(), "a < b & c");
    }

    #[test]
    fn test_to_xml_without_pairings_keeps_both_collections() {
        let rendered = MergedDocument::with_created(Vec::new(), CREATED).to_xml().unwrap();
        let root = xml::parse(&rendered).unwrap();
        assert_eq!(root.child_elements("InternalSignatureCollection").count(), 1);
        assert_eq!(root.child_elements("FileFormatCollection").count(), 1);
    }

    #[test]
    fn test_utc_timestamp_now_format() {
        let now = utc_timestamp_now().unwrap();
        assert_eq!(now.len(), "YYYY-MM-DDTHH:MM:SSZ".len());
        assert_eq!(&now[4..5], "-");
        assert_eq!(&now[10..11], "T");
        assert!(now.ends_with('Z'));
    }

    #[test]
    fn test_new_stamps_current_time() {
        let document = MergedDocument::new(vec![pairing(1, "One")]).unwrap();
        assert!(document.created().ends_with('Z'));
        assert_eq!(document.pairings().len(), 1);
    }

    #[test]
    fn test_strip_blank_lines() {
        assert_eq!(strip_blank_lines("a\n\n  \nb\n"), "a\nb\n");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out/merged.xml");
        write("<x/>\n", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<x/>\n");
    }
}
