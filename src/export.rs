//! One-call export of a [`Table`] to a named file payload.
//!
//! [`Exporter`] ties the serializers together: it renders the bytes, picks
//! the MIME type, and builds the file name from a sanitized base name and an
//! optional date suffix. The resulting [`ExportFile`] can be handed to
//! whatever delivers it, or saved into a directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::cell::Table;
use crate::csv::{to_csv_bytes, to_csv_string, CsvConfig};
use crate::error::Result;
use crate::filename::file_name;
use crate::width::{infer_column_widths, WidthPolicy};
use crate::xlsx::{Package, WorksheetBuilder};

/// Per-export settings.
///
/// Every field has a default, so a configuration file only needs to list
/// what it changes.
///
/// # Examples
///
/// ```
/// use tabex::ExportOptions;
///
/// let options = ExportOptions::default()
///     .with_sheet_name("Schedule")
///     .with_date_suffix(false);
/// assert!(options.freeze_header);
/// assert_eq!(options.sheet_name, "Schedule");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Worksheet name, sanitized before use.
    pub sheet_name: String,
    /// Explicit column widths; inferred from the data when `None`.
    pub column_widths: Option<Vec<u32>>,
    /// Freeze the header row in the worksheet view.
    pub freeze_header: bool,
    /// Append `_YYYY-MM-DD` to file names.
    pub date_suffix: bool,
    pub width_policy: WidthPolicy,
    pub csv: CsvConfig,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            column_widths: None,
            freeze_header: true,
            date_suffix: true,
            width_policy: WidthPolicy::default(),
            csv: CsvConfig::default(),
        }
    }
}

impl ExportOptions {
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    pub fn with_column_widths(mut self, widths: Option<Vec<u32>>) -> Self {
        self.column_widths = widths;
        self
    }

    pub fn with_freeze_header(mut self, freeze: bool) -> Self {
        self.freeze_header = freeze;
        self
    }

    pub fn with_date_suffix(mut self, date_suffix: bool) -> Self {
        self.date_suffix = date_suffix;
        self
    }

    pub fn with_width_policy(mut self, policy: WidthPolicy) -> Self {
        self.width_policy = policy;
        self
    }

    pub fn with_csv(mut self, csv: CsvConfig) -> Self {
        self.csv = csv;
        self
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            },
        }
    }
}

/// A rendered export, ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Write the payload to any sink.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Save the payload as `dir/<file_name>`, replacing any existing file.
    pub fn save_in(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        debug!("saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Renders tables with a fixed set of [`ExportOptions`].
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
    date: Option<NaiveDate>,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            date: None,
        }
    }

    /// Use `date` for file name suffixes instead of today's local date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// File name for `base` in `format`.
    pub fn file_name(&self, base: &str, format: ExportFormat) -> String {
        let date = self
            .options
            .date_suffix
            .then(|| self.date.unwrap_or_else(|| Local::now().date_naive()));
        file_name(base, format.extension(), date)
    }

    /// Render `table` as CSV.
    pub fn export_csv(&self, table: &Table, base: &str) -> ExportFile {
        debug!(
            "exporting {}x{} table as CSV",
            table.len(),
            table.column_count()
        );
        let bytes = to_csv_bytes(table, &self.options.csv);
        self.finish(base, ExportFormat::Csv, bytes)
    }

    /// Render `table` as a one-sheet XLSX workbook.
    ///
    /// Fails only if the workbook exceeds what a ZIP archive without ZIP64
    /// extensions can hold.
    pub fn export_xlsx(&self, table: &Table, base: &str) -> Result<ExportFile> {
        debug!(
            "exporting {}x{} table as XLSX",
            table.len(),
            table.column_count()
        );
        let bytes = self.xlsx_bytes(table)?;
        Ok(self.finish(base, ExportFormat::Xlsx, bytes))
    }

    /// Render `table` in `format`.
    pub fn export(&self, table: &Table, base: &str, format: ExportFormat) -> Result<ExportFile> {
        match format {
            ExportFormat::Csv => Ok(self.export_csv(table, base)),
            ExportFormat::Xlsx => self.export_xlsx(table, base),
        }
    }

    fn xlsx_bytes(&self, table: &Table) -> Result<Vec<u8>> {
        let widths = match &self.options.column_widths {
            Some(widths) => widths.clone(),
            None => infer_column_widths(table, &self.options.width_policy),
        };
        let sheet = WorksheetBuilder::new(table)
            .widths(widths)
            .freeze_header(self.options.freeze_header)
            .build();
        Package::assemble(&self.options.sheet_name, sheet).into_zip()
    }

    fn finish(&self, base: &str, format: ExportFormat, bytes: Vec<u8>) -> ExportFile {
        let file_name = self.file_name(base, format);
        debug!("rendered {file_name} ({} bytes)", bytes.len());
        ExportFile {
            file_name,
            mime_type: format.mime_type(),
            bytes,
        }
    }
}

/// CSV text of `table` with default settings, without the byte order mark.
pub fn to_csv(table: &Table) -> String {
    to_csv_string(table, &CsvConfig::default())
}

/// XLSX bytes of `table` with default settings.
pub fn to_xlsx(table: &Table) -> Result<Vec<u8>> {
    Exporter::default().xlsx_bytes(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::csv::UTF8_BOM;
    use tabex_zip::ArchiveReader;

    fn scenario() -> Table {
        Table::from_rows([
            vec![Cell::from("Type"), Cell::from("Amount")],
            vec![Cell::from("Income"), Cell::from(1200)],
            vec![Cell::from("Note"), Cell::from("=SUM(A1:A2)")],
        ])
    }

    fn pinned(options: ExportOptions) -> Exporter {
        Exporter::new(options).with_date(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
    }

    #[test]
    fn csv_export() {
        let file = pinned(ExportOptions::default()).export_csv(&scenario(), "Budget Summary");
        assert_eq!(file.file_name, "Budget_Summary_2024-06-30.csv");
        assert_eq!(file.mime_type, "text/csv;charset=utf-8");
        assert_eq!(&file.bytes[..3], &UTF8_BOM);
        assert!(file.bytes.ends_with(b"Note,'=SUM(A1:A2)\r\n"));
    }

    #[test]
    fn xlsx_export() {
        let options = ExportOptions::default().with_sheet_name("Budget");
        let file = pinned(options).export_xlsx(&scenario(), "budget").unwrap();
        assert_eq!(file.file_name, "budget_2024-06-30.xlsx");
        assert_eq!(file.mime_type, ExportFormat::Xlsx.mime_type());

        let archive = ArchiveReader::new(&file.bytes).unwrap();
        assert_eq!(archive.len(), 6);
        let workbook = archive.read_string("xl/workbook.xml").unwrap();
        assert!(workbook.contains(r#"name="Budget""#));
        let sheet = archive.read_string("xl/worksheets/sheet1.xml").unwrap();
        assert!(sheet.contains("&apos;=SUM(A1:A2)"));
        assert!(sheet.contains(r#"<col min="1" max="1" width="10" customWidth="1"/>"#));
    }

    #[test]
    fn explicit_widths_win() {
        let options = ExportOptions::default().with_column_widths(Some(vec![33, 44]));
        let bytes = pinned(options).export_xlsx(&scenario(), "w").unwrap().bytes;
        let archive = ArchiveReader::new(&bytes).unwrap();
        let sheet = archive.read_string("xl/worksheets/sheet1.xml").unwrap();
        assert!(sheet.contains(r#"width="33""#));
        assert!(sheet.contains(r#"width="44""#));
    }

    #[test]
    fn date_suffix_can_be_disabled() {
        let exporter = pinned(ExportOptions::default().with_date_suffix(false));
        assert_eq!(exporter.file_name("a b", ExportFormat::Csv), "a_b.csv");
        let file = exporter.export(&scenario(), "", ExportFormat::Xlsx).unwrap();
        assert_eq!(file.file_name, "export.xlsx");
    }

    #[test]
    fn unpinned_date_uses_today() {
        let exporter = Exporter::default();
        let before = Local::now().date_naive();
        let name = exporter.file_name("x", ExportFormat::Csv);
        let after = Local::now().date_naive();
        // Either read of the clock, in case the test straddles midnight
        let candidates = [before, after].map(|d| format!("x_{}.csv", d.format("%Y-%m-%d")));
        assert!(candidates.contains(&name), "{name}");
    }

    #[test]
    fn empty_table_exports() {
        let table = Table::new();
        assert_eq!(to_csv(&table), "");
        let bytes = to_xlsx(&table).unwrap();
        let archive = ArchiveReader::new(&bytes).unwrap();
        let sheet = archive.read_string("xl/worksheets/sheet1.xml").unwrap();
        assert!(sheet.contains(r#"<dimension ref="A1:A1"/>"#));
    }

    #[test]
    fn exports_are_deterministic() {
        let exporter = pinned(ExportOptions::default());
        let table = scenario();
        assert_eq!(
            exporter.export_xlsx(&table, "d").unwrap(),
            exporter.export_xlsx(&table, "d").unwrap()
        );
        assert_eq!(to_xlsx(&table).unwrap(), to_xlsx(&table).unwrap());
    }

    #[test]
    fn write_to_sink() {
        let file = pinned(ExportOptions::default()).export_csv(&scenario(), "s");
        let mut sink = Vec::new();
        file.write_to(&mut sink).unwrap();
        assert_eq!(sink, file.bytes);
    }
}
