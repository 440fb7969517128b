//! Tabex - CSV and XLSX export for in-memory tables
//!
//! This library serializes a [`Table`] of cells into files a spreadsheet
//! application opens directly, without any third-party spreadsheet or ZIP
//! writer.
//!
//! # Features
//!
//! - **CSV**: UTF-8 with a byte order mark, CRLF row endings, RFC 4180 quoting
//! - **XLSX**: a hand-built single-sheet workbook with a bold, frozen,
//!   filterable header row and inferred column widths
//! - **Formula-injection guard**: text that a spreadsheet would evaluate as a
//!   formula is prefixed with `'` in both formats
//! - **Store-only ZIP**: written and verified by the `tabex-zip` workspace crate
//! - **File naming**: sanitized base names with an optional `_YYYY-MM-DD` suffix
//!
//! # Example - Exporting a table
//!
//! ```
//! use chrono::NaiveDate;
//! use tabex::{Cell, ExportOptions, Exporter, Table};
//!
//! # fn main() -> Result<(), tabex::Error> {
//! let table = Table::from_rows([
//!     vec![Cell::from("Type"), Cell::from("Amount")],
//!     vec![Cell::from("Income"), Cell::from(1200)],
//!     vec![Cell::from("Note"), Cell::from("=SUM(A1:A2)")],
//! ]);
//!
//! let exporter = Exporter::new(ExportOptions::default().with_sheet_name("Budget"))
//!     .with_date(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
//!
//! let csv = exporter.export_csv(&table, "budget");
//! assert_eq!(csv.file_name, "budget_2024-06-30.csv");
//! assert!(csv.bytes.ends_with(b"Note,'=SUM(A1:A2)\r\n"));
//!
//! let xlsx = exporter.export_xlsx(&table, "budget")?;
//! assert_eq!(xlsx.file_name, "budget_2024-06-30.xlsx");
//! assert_eq!(&xlsx.bytes[..4], b"PK\x03\x04");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Lower-level pieces
//!
//! ```
//! use tabex::{infer_column_widths, to_csv_string, Cell, CsvConfig, Table, WidthPolicy};
//! use tabex::xlsx::{Package, WorksheetBuilder};
//!
//! # fn main() -> Result<(), tabex::Error> {
//! let table = Table::from_rows([vec![Cell::from("Name"), Cell::from("Score")]]);
//!
//! let text = to_csv_string(&table, &CsvConfig::tsv());
//! assert_eq!(text, "Name\tScore\r\n");
//!
//! let widths = infer_column_widths(&table, &WidthPolicy::default());
//! let sheet = WorksheetBuilder::new(&table).widths(widths).build();
//! let bytes = Package::assemble("Scores", sheet).into_zip()?;
//! assert!(!bytes.is_empty());
//! # Ok(())
//! # }
//! ```

mod cell;
pub mod csv;
mod error;
pub mod export;
mod filename;
mod format;
mod width;
pub mod xlsx;
mod xml;

// Re-exports
pub use crate::cell::{Cell, Row, Table};
pub use crate::csv::{to_csv_bytes, to_csv_string, write_csv, CsvConfig, LineEnding, UTF8_BOM};
pub use crate::error::{Error, Result};
pub use crate::export::{to_csv, to_xlsx, ExportFile, ExportFormat, ExportOptions, Exporter};
pub use crate::filename::{file_name, sanitize_base_name};
pub use crate::format::{cell_text, csv_field, format_number, needs_formula_guard, sanitize_text};
pub use crate::width::{infer_column_widths, WidthPolicy};
pub use crate::xml::escape_xml;
