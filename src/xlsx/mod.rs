//! Hand-built XLSX output.
//!
//! A workbook is produced in three steps: [`WorksheetBuilder`] renders the
//! cells, [`Package::assemble`] adds the fixed workbook, relationship,
//! content type and style parts, and [`Package::into_zip`] stores everything
//! in a ZIP container.
//!
//! # Example
//!
//! ```rust
//! use tabex::{Cell, Table};
//! use tabex::xlsx::{Package, WorksheetBuilder};
//!
//! let table = Table::from_rows([
//!     vec![Cell::from("Type"), Cell::from("Amount")],
//!     vec![Cell::from("Income"), Cell::from(1200)],
//! ]);
//! let sheet = WorksheetBuilder::new(&table).widths([10, 10]).build();
//! let bytes = Package::assemble("Summary", sheet).into_zip()?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), tabex::Error>(())
//! ```

mod package;
mod reference;
mod sheet;
mod styles;

pub use package::{
    sanitize_sheet_name, Package, CONTENT_TYPE_RELATIONSHIPS, CONTENT_TYPE_STYLES,
    CONTENT_TYPE_WORKBOOK, CONTENT_TYPE_WORKSHEET, CONTENT_TYPE_XML, MAX_SHEET_NAME_CHARS,
    NS_CONTENT_TYPES, NS_PACKAGE_RELATIONSHIPS, NS_RELATIONSHIPS, NS_SPREADSHEETML,
    PART_CONTENT_TYPES, PART_ROOT_RELS, PART_STYLES, PART_WORKBOOK, PART_WORKBOOK_RELS,
    PART_WORKSHEET, REL_TYPE_OFFICE_DOCUMENT, REL_TYPE_STYLES, REL_TYPE_WORKSHEET,
};
pub use reference::{cell_reference, column_letters, range_reference};
pub use sheet::{WorksheetBuilder, STYLE_DEFAULT, STYLE_HEADER};
