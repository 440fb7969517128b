//! Worksheet part (`xl/worksheets/sheet1.xml`) generation.

use std::fmt::Write as _;

use crate::cell::{Cell, Table};
use crate::format::{format_number, sanitize_text};
use crate::xml::xml_text;

use super::reference::{cell_reference, range_reference};
use super::package::{NS_RELATIONSHIPS, NS_SPREADSHEETML};

/// Style index of the default cell format.
pub const STYLE_DEFAULT: u32 = 0;
/// Style index of the bold header format.
pub const STYLE_HEADER: u32 = 1;

/// Builds the XML of a single worksheet from a [`Table`].
///
/// Every cell value is written inline (`t="inlineStr"` for text), so the
/// package needs no shared strings part. Row 0 is styled as the header.
///
/// # Examples
///
/// ```
/// use tabex::{Cell, Table};
/// use tabex::xlsx::WorksheetBuilder;
///
/// let table = Table::from_rows([
///     vec![Cell::from("Type"), Cell::from("Amount")],
///     vec![Cell::from("Income"), Cell::from(1200)],
/// ]);
/// let xml = WorksheetBuilder::new(&table).widths([12, 10]).build();
/// assert!(xml.contains(r#"<dimension ref="A1:B2"/>"#));
/// assert!(xml.contains(r#"<c r="B2"><v>1200</v></c>"#));
/// ```
#[derive(Debug, Clone)]
pub struct WorksheetBuilder<'a> {
    table: &'a Table,
    widths: Vec<u32>,
    freeze_header: bool,
}

impl<'a> WorksheetBuilder<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            widths: Vec::new(),
            freeze_header: true,
        }
    }

    /// Column widths in character units, first column first.
    ///
    /// No `<cols>` element is written when this is empty.
    pub fn widths(mut self, widths: impl IntoIterator<Item = u32>) -> Self {
        self.widths = widths.into_iter().collect();
        self
    }

    /// Keep the header row visible while scrolling. Only applies to tables
    /// with at least one row below the header.
    pub fn freeze_header(mut self, freeze: bool) -> Self {
        self.freeze_header = freeze;
        self
    }

    /// Last used row and column, 0-based. An empty table still spans `A1`.
    fn last_cell(&self) -> (u32, u32) {
        let last_row = self.table.len().saturating_sub(1);
        let last_col = self.table.column_count().saturating_sub(1);
        (to_u32(last_row), to_u32(last_col))
    }

    /// Render the worksheet document.
    pub fn build(&self) -> String {
        let mut xml = String::with_capacity(1024 + self.table.len() * 64);
        let (last_row, last_col) = self.last_cell();
        let has_body = self.table.len() > 1;

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        let _ = write!(
            xml,
            r#"<worksheet xmlns="{NS_SPREADSHEETML}" xmlns:r="{NS_RELATIONSHIPS}">"#
        );

        let _ = write!(
            xml,
            r#"<dimension ref="{}"/>"#,
            range_reference(0, 0, last_row, last_col)
        );

        self.write_sheet_views(&mut xml, has_body);
        xml.push_str(r#"<sheetFormatPr defaultRowHeight="15"/>"#);
        self.write_cols(&mut xml);
        self.write_sheet_data(&mut xml);

        if has_body {
            let _ = write!(
                xml,
                r#"<autoFilter ref="{}"/>"#,
                range_reference(0, 0, 0, last_col)
            );
        }

        xml.push_str(
            r#"<pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>"#,
        );
        xml.push_str("</worksheet>");
        xml
    }

    fn write_sheet_views(&self, xml: &mut String, has_body: bool) {
        xml.push_str(r#"<sheetViews><sheetView tabSelected="1" workbookViewId="0">"#);
        if self.freeze_header && has_body {
            xml.push_str(
                r#"<pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/>"#,
            );
            xml.push_str(r#"<selection pane="bottomLeft" activeCell="A2" sqref="A2"/>"#);
        }
        xml.push_str("</sheetView></sheetViews>");
    }

    fn write_cols(&self, xml: &mut String) {
        if self.widths.is_empty() {
            return;
        }
        xml.push_str("<cols>");
        for (col, width) in self.widths.iter().enumerate() {
            let index = col + 1;
            let _ = write!(
                xml,
                r#"<col min="{index}" max="{index}" width="{width}" customWidth="1"/>"#
            );
        }
        xml.push_str("</cols>");
    }

    fn write_sheet_data(&self, xml: &mut String) {
        xml.push_str("<sheetData>");
        for (row_idx, row) in self.table.rows().iter().enumerate() {
            let row_idx = to_u32(row_idx);
            let style = if row_idx == 0 { STYLE_HEADER } else { STYLE_DEFAULT };
            let _ = write!(xml, r#"<row r="{}">"#, u64::from(row_idx) + 1);
            for (col_idx, cell) in row.iter().enumerate() {
                write_cell(xml, &cell_reference(row_idx, to_u32(col_idx)), cell, style);
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData>");
    }
}

/// Append one `<c>` element. Cells that render as nothing are skipped.
fn write_cell(xml: &mut String, cell_ref: &str, cell: &Cell, style: u32) {
    let style_attr = if style == STYLE_DEFAULT {
        String::new()
    } else {
        format!(r#" s="{style}""#)
    };

    match cell {
        Cell::Empty => {},
        Cell::Number(n) => {
            if let Some(value) = format_number(*n) {
                let _ = write!(xml, r#"<c r="{cell_ref}"{style_attr}><v>{value}</v></c>"#);
            }
        },
        Cell::Bool(b) => {
            let value = if *b { "1" } else { "0" };
            let _ = write!(xml, r#"<c r="{cell_ref}"{style_attr} t="b"><v>{value}</v></c>"#);
        },
        Cell::Text(text) => {
            let sanitized = sanitize_text(text);
            let content = xml_text(&sanitized);
            if content.is_empty() {
                return;
            }
            let _ = write!(xml, r#"<c r="{cell_ref}"{style_attr} t="inlineStr"><is>"#);
            // Keep leading/trailing whitespace, which XML would otherwise collapse
            if content.starts_with(char::is_whitespace) || content.ends_with(char::is_whitespace)
            {
                let _ = write!(xml, r#"<t xml:space="preserve">{content}</t>"#);
            } else {
                let _ = write!(xml, "<t>{content}</t>");
            }
            xml.push_str("</is></c>");
        },
    }
}

/// Sheet coordinates are bounded by the table's in-memory size; anything
/// past `u32` is far beyond what a worksheet can hold anyway.
#[inline]
fn to_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
