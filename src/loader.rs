//! Reads the XML system description into ordered device and job records.
//!
//! ```xml
//! <SYSTEM>
//!     <DEVICE>
//!         <name>Office_Printer1</name>
//!         <emission>3</emission>
//!         <speed>40</speed>
//!     </DEVICE>
//!     <JOB>
//!         <jobNumber>89751</jobNumber>
//!         <pageCount>2</pageCount>
//!     </JOB>
//! </SYSTEM>
//! ```
//!
//! Parsing is tolerant: a bad record becomes an `Err` entry and the rest of
//! the document is still read. Only an unreadable or ill-formed document
//! fails as a whole. Input is UTF-8 unless the XML declaration names
//! ISO-8859-1.

use std::path::Path;

use crate::error::{PrintShopError, Result};

pub const ROOT_TAG: &str = "SYSTEM";
pub const DEVICE_TAG: &str = "DEVICE";
pub const JOB_TAG: &str = "JOB";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub name: String,
    pub emission: i32,
    pub speed: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub number: i32,
    pub page_count: i32,
}

/// One top-level element of the document.
#[derive(Debug)]
pub enum Entry {
    Device(Result<DeviceRecord>),
    Job(Result<JobRecord>),
    /// Element with a tag that is neither `DEVICE` nor `JOB`
    Unrecognized(String),
}

#[derive(Debug)]
pub struct Document {
    pub root: String,
    pub entries: Vec<Entry>,
}

impl Document {
    pub fn has_expected_root(&self) -> bool {
        self.root == ROOT_TAG
    }
}

/// Read and parse the document at `path`.
pub fn read_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| PrintShopError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&decode(bytes)?)
}

pub fn parse_document(text: &str) -> Result<Document> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, options)
        .map_err(|e| PrintShopError::InvalidDocument(e.to_string()))?;
    let root = doc.root_element();

    let entries = root
        .children()
        .filter(|node| node.is_element())
        .map(read_entry)
        .collect();

    Ok(Document {
        root: root.tag_name().name().to_string(),
        entries,
    })
}

/// Turn the raw file contents into text. Documents declared as ISO-8859-1
/// are transcoded byte for byte; everything else must be UTF-8.
fn decode(bytes: Vec<u8>) -> Result<String> {
    if declared_encoding(&bytes).is_some_and(is_latin1) {
        return Ok(bytes.iter().copied().map(char::from).collect());
    }
    String::from_utf8(bytes).map_err(|e| {
        PrintShopError::InvalidDocument(format!("document is not valid UTF-8: {}", e))
    })
}

/// Value of the `encoding` pseudo-attribute of the XML declaration.
fn declared_encoding(bytes: &[u8]) -> Option<&str> {
    let rest = bytes.strip_prefix(b"<?xml")?;
    let end = rest.windows(2).position(|w| w == b"?>")?;
    let declaration = std::str::from_utf8(&rest[..end]).ok()?;
    let value = declaration
        .split_once("encoding")?
        .1
        .trim_start()
        .strip_prefix('=')?
        .trim_start();
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    value[1..].split(quote).next()
}

fn is_latin1(encoding: &str) -> bool {
    ["ISO-8859-1", "ISO8859-1", "ISO_8859-1", "LATIN1", "LATIN-1"]
        .iter()
        .any(|label| label.eq_ignore_ascii_case(encoding))
}

fn read_entry(node: roxmltree::Node) -> Entry {
    match node.tag_name().name() {
        DEVICE_TAG => Entry::Device(read_device(node)),
        JOB_TAG => Entry::Job(read_job(node)),
        other => Entry::Unrecognized(other.to_string()),
    }
}

fn read_device(node: roxmltree::Node) -> Result<DeviceRecord> {
    let name = field(node, DEVICE_TAG, "name")?;
    if name.is_empty() {
        return Err(PrintShopError::malformed(DEVICE_TAG, "name is empty"));
    }
    Ok(DeviceRecord {
        name: name.to_string(),
        emission: integer(node, DEVICE_TAG, "emission")?,
        speed: integer(node, DEVICE_TAG, "speed")?,
    })
}

fn read_job(node: roxmltree::Node) -> Result<JobRecord> {
    Ok(JobRecord {
        number: integer(node, JOB_TAG, "jobNumber")?,
        page_count: integer(node, JOB_TAG, "pageCount")?,
    })
}

fn field<'a>(node: roxmltree::Node<'a, '_>, tag: &str, name: &str) -> Result<&'a str> {
    node.children()
        .find(|child| child.is_element() && child.has_tag_name(name))
        .map(|child| child.text().unwrap_or("").trim())
        .ok_or_else(|| PrintShopError::malformed(tag, format!("missing field '{}'", name)))
}

fn integer(node: roxmltree::Node, tag: &str, name: &str) -> Result<i32> {
    let text = field(node, tag, name)?;
    text.parse().map_err(|_| {
        PrintShopError::malformed(tag, format!("field '{}' is not an integer: '{}'", name, text))
    })
}
