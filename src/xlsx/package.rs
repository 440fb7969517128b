//! Assembly of the single-sheet OOXML package.
//!
//! A package is the fixed list of parts that makes up a minimal workbook:
//!
//! | Path | Content |
//! |------|---------|
//! | `[Content_Types].xml` | content type of every part |
//! | `_rels/.rels` | points at the workbook |
//! | `xl/workbook.xml` | the one sheet and its name |
//! | `xl/_rels/workbook.xml.rels` | points at the sheet and styles |
//! | `xl/styles.xml` | default and bold header cell formats |
//! | `xl/worksheets/sheet1.xml` | the cells |
//!
//! Every relationship target and content type override names one of these
//! paths through the constants below, so they cannot drift apart.

use std::fmt::Write as _;

use log::trace;
use tabex_zip::{ZipArchiveWriter, ZipEntry};

use crate::error::Result;
use crate::xml::{escape_xml, is_xml_char};

use super::styles::styles_xml;

pub const NS_SPREADSHEETML: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_PACKAGE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
pub const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

pub const CONTENT_TYPE_RELATIONSHIPS: &str =
    "application/vnd.openxmlformats-package.relationships+xml";
pub const CONTENT_TYPE_XML: &str = "application/xml";
pub const CONTENT_TYPE_WORKBOOK: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
pub const CONTENT_TYPE_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
pub const CONTENT_TYPE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";

pub const REL_TYPE_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_TYPE_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
pub const REL_TYPE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

pub const PART_CONTENT_TYPES: &str = "[Content_Types].xml";
pub const PART_ROOT_RELS: &str = "_rels/.rels";
pub const PART_WORKBOOK: &str = "xl/workbook.xml";
pub const PART_WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
pub const PART_STYLES: &str = "xl/styles.xml";
pub const PART_WORKSHEET: &str = "xl/worksheets/sheet1.xml";

/// Longest sheet name spreadsheet applications accept.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const DEFAULT_SHEET_NAME: &str = "Sheet1";
const ILLEGAL_SHEET_NAME_CHARS: [char; 7] = ['\\', '/', '?', '*', '[', ']', ':'];

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

/// Make a string usable as a sheet name.
///
/// Removes the characters sheet names may not contain and any control
/// characters, trims surrounding whitespace and apostrophes, and keeps at
/// most 31 characters. Falls back to `Sheet1` if nothing is left.
///
/// # Examples
///
/// ```
/// use tabex::xlsx::sanitize_sheet_name;
/// assert_eq!(sanitize_sheet_name("Q1/Q2 [draft]"), "Q1Q2 draft");
/// assert_eq!(sanitize_sheet_name("  'Budget'  "), "Budget");
/// assert_eq!(sanitize_sheet_name("***"), "Sheet1");
/// ```
pub fn sanitize_sheet_name(name: &str) -> String {
    let is_trimmed = |c: char| c.is_whitespace() || c == '\'';

    let kept: String = name
        .chars()
        .filter(|&c| is_xml_char(c) && !c.is_control() && !ILLEGAL_SHEET_NAME_CHARS.contains(&c))
        .collect();
    let capped: String = kept
        .trim_matches(is_trimmed)
        .chars()
        .take(MAX_SHEET_NAME_CHARS)
        .collect();
    // Truncation can expose trailing whitespace again
    let capped = capped.trim_matches(is_trimmed);

    if capped.is_empty() {
        DEFAULT_SHEET_NAME.to_string()
    } else {
        capped.to_string()
    }
}

/// The ordered parts of a one-sheet workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    sheet_name: String,
    entries: Vec<ZipEntry>,
}

impl Package {
    /// Wrap a worksheet document in the parts that make it a workbook.
    ///
    /// `sheet_name` is passed through [`sanitize_sheet_name`].
    pub fn assemble(sheet_name: &str, worksheet_xml: impl Into<Vec<u8>>) -> Self {
        let sheet_name = sanitize_sheet_name(sheet_name);
        let entries = vec![
            ZipEntry::new(PART_CONTENT_TYPES, content_types_xml()),
            ZipEntry::new(PART_ROOT_RELS, root_rels_xml()),
            ZipEntry::new(PART_WORKBOOK, workbook_xml(&sheet_name)),
            ZipEntry::new(PART_WORKBOOK_RELS, workbook_rels_xml()),
            ZipEntry::new(PART_STYLES, styles_xml()),
            ZipEntry::new(PART_WORKSHEET, worksheet_xml),
        ];
        for entry in &entries {
            trace!("package part {} ({} bytes)", entry.path, entry.bytes.len());
        }
        Self {
            sheet_name,
            entries,
        }
    }

    /// The sanitized sheet name written to the workbook part.
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Parts in archive order.
    pub fn entries(&self) -> &[ZipEntry] {
        &self.entries
    }

    /// Write the parts into a store-only ZIP archive.
    pub fn into_zip(self) -> Result<Vec<u8>> {
        let mut writer = ZipArchiveWriter::new();
        for entry in &self.entries {
            writer.write_entry(entry)?;
        }
        Ok(writer.finish()?)
    }
}

/// Overrides name parts by absolute path.
fn part_name(path: &str) -> String {
    format!("/{path}")
}

fn content_types_xml() -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    let _ = write!(xml, r#"<Types xmlns="{NS_CONTENT_TYPES}">"#);
    let _ = write!(
        xml,
        r#"<Default Extension="rels" ContentType="{CONTENT_TYPE_RELATIONSHIPS}"/>"#
    );
    let _ = write!(xml, r#"<Default Extension="xml" ContentType="{CONTENT_TYPE_XML}"/>"#);
    for (path, content_type) in [
        (PART_WORKBOOK, CONTENT_TYPE_WORKBOOK),
        (PART_WORKSHEET, CONTENT_TYPE_WORKSHEET),
        (PART_STYLES, CONTENT_TYPE_STYLES),
    ] {
        let _ = write!(
            xml,
            r#"<Override PartName="{}" ContentType="{content_type}"/>"#,
            part_name(path)
        );
    }
    xml.push_str("</Types>");
    xml
}

fn root_rels_xml() -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    let _ = write!(xml, r#"<Relationships xmlns="{NS_PACKAGE_RELATIONSHIPS}">"#);
    let _ = write!(
        xml,
        r#"<Relationship Id="rId1" Type="{REL_TYPE_OFFICE_DOCUMENT}" Target="{PART_WORKBOOK}"/>"#
    );
    xml.push_str("</Relationships>");
    xml
}

fn workbook_xml(sheet_name: &str) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    let _ = write!(
        xml,
        r#"<workbook xmlns="{NS_SPREADSHEETML}" xmlns:r="{NS_RELATIONSHIPS}">"#
    );
    xml.push_str(r#"<bookViews><workbookView activeTab="0"/></bookViews>"#);
    let _ = write!(
        xml,
        r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets>"#,
        escape_xml(sheet_name)
    );
    xml.push_str("</workbook>");
    xml
}

/// Targets are relative to `xl/`, where the workbook part lives.
fn workbook_rels_xml() -> String {
    let relative = |path: &'static str| path.strip_prefix("xl/").unwrap_or(path);

    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    let _ = write!(xml, r#"<Relationships xmlns="{NS_PACKAGE_RELATIONSHIPS}">"#);
    let _ = write!(
        xml,
        r#"<Relationship Id="rId1" Type="{REL_TYPE_WORKSHEET}" Target="{}"/>"#,
        relative(PART_WORKSHEET)
    );
    let _ = write!(
        xml,
        r#"<Relationship Id="rId2" Type="{REL_TYPE_STYLES}" Target="{}"/>"#,
        relative(PART_STYLES)
    );
    xml.push_str("</Relationships>");
    xml
}
