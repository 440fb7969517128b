//! Stylesheet part (`xl/styles.xml`).
//!
//! The stylesheet is fixed: two fonts (regular and bold), the two fills
//! every workbook must declare, one empty border, and two cell formats.
//! Cell format indices line up with [`STYLE_DEFAULT`] and [`STYLE_HEADER`].
//!
//! [`STYLE_DEFAULT`]: super::sheet::STYLE_DEFAULT
//! [`STYLE_HEADER`]: super::sheet::STYLE_HEADER

use std::fmt::Write as _;

use super::package::NS_SPREADSHEETML;

const FONT_REGULAR: &str = r#"<font><sz val="11"/><name val="Calibri"/><family val="2"/></font>"#;
const FONT_BOLD: &str = r#"<font><b/><sz val="11"/><name val="Calibri"/><family val="2"/></font>"#;

/// Render the stylesheet.
pub(crate) fn styles_xml() -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
    let _ = write!(xml, r#"<styleSheet xmlns="{NS_SPREADSHEETML}">"#);

    let _ = write!(xml, r#"<fonts count="2">{FONT_REGULAR}{FONT_BOLD}</fonts>"#);
    xml.push_str(r#"<fills count="2">"#);
    xml.push_str(r#"<fill><patternFill patternType="none"/></fill>"#);
    xml.push_str(r#"<fill><patternFill patternType="gray125"/></fill>"#);
    xml.push_str("</fills>");
    xml.push_str(
        r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
    );
    xml.push_str(
        r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    );

    xml.push_str(r#"<cellXfs count="2">"#);
    xml.push_str(r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#);
    xml.push_str(
        r#"<xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>"#,
    );
    xml.push_str("</cellXfs>");

    xml.push_str(
        r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
    );
    xml.push_str("</styleSheet>");
    xml
}
