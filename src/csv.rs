//! CSV serialization of a [`Table`].
//!
//! Output is UTF-8, optionally prefixed with a byte order mark so that
//! spreadsheet applications pick the right encoding, and every row ends with
//! the configured line ending (CRLF by default), including the last one.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cell::Table;
use crate::error::Result;
use crate::format::csv_field;

/// UTF-8 byte order mark.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Row terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
}

impl LineEnding {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Settings for delimited text output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    pub delimiter: char,
    pub line_ending: LineEnding,
    /// Prefix byte output with [`UTF8_BOM`].
    pub write_bom: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            line_ending: LineEnding::CrLf,
            write_bom: true,
        }
    }
}

impl CsvConfig {
    pub fn csv() -> Self {
        Self::default()
    }

    pub fn tsv() -> Self {
        Self {
            delimiter: '\t',
            ..Self::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_write_bom(mut self, write_bom: bool) -> Self {
        self.write_bom = write_bom;
        self
    }
}

/// Serialize a table to CSV text, without the byte order mark.
///
/// An empty table produces an empty string. Ragged rows produce shorter
/// lines; nothing is padded.
///
/// # Examples
///
/// ```
/// use tabex::{to_csv_string, Cell, CsvConfig, Table};
///
/// let table = Table::from_rows([
///     vec![Cell::from("Type"), Cell::from("Amount")],
///     vec![Cell::from("Income"), Cell::from(1200)],
/// ]);
/// assert_eq!(
///     to_csv_string(&table, &CsvConfig::default()),
///     "Type,Amount\r\nIncome,1200\r\n"
/// );
/// ```
pub fn to_csv_string(table: &Table, config: &CsvConfig) -> String {
    let mut out = String::new();
    let mut delimiter_buf = [0u8; 4];
    let delimiter = config.delimiter.encode_utf8(&mut delimiter_buf);
    let line_ending = config.line_ending.as_str();

    for row in table.rows() {
        for (col_idx, cell) in row.iter().enumerate() {
            if col_idx > 0 {
                out.push_str(delimiter);
            }
            out.push_str(&csv_field(cell, config.delimiter));
        }
        out.push_str(line_ending);
    }

    out
}

/// Serialize a table to CSV bytes, BOM included when configured.
pub fn to_csv_bytes(table: &Table, config: &CsvConfig) -> Vec<u8> {
    let text = to_csv_string(table, config);
    let mut bytes = Vec::with_capacity(text.len() + UTF8_BOM.len());
    if config.write_bom {
        bytes.extend_from_slice(&UTF8_BOM);
    }
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

/// Write the same bytes as [`to_csv_bytes`] into `writer`.
pub fn write_csv<W: Write>(writer: &mut W, table: &Table, config: &CsvConfig) -> Result<()> {
    if config.write_bom {
        writer.write_all(&UTF8_BOM)?;
    }
    writer.write_all(to_csv_string(table, config).as_bytes())?;
    Ok(())
}
