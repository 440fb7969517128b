//! Export options loaded from configuration files, and saving to disk.

use chrono::NaiveDate;
use tabex::{
    Cell, CsvConfig, ExportFormat, ExportOptions, Exporter, LineEnding, Table, WidthPolicy,
};

fn table() -> Table {
    Table::from_rows([
        vec![Cell::from("Month"), Cell::from("Payment")],
        vec![Cell::from(1), Cell::from(536.82)],
    ])
}

#[test]
fn partial_yaml_keeps_defaults() {
    let yaml = "sheet_name: Amortization\ndate_suffix: false\n";
    let options: ExportOptions = serde_saphyr::from_str(yaml).unwrap();

    assert_eq!(options.sheet_name, "Amortization");
    assert!(!options.date_suffix);
    assert!(options.freeze_header);
    assert_eq!(options.column_widths, None);
    assert_eq!(options.width_policy, WidthPolicy::default());
    assert_eq!(options.csv, CsvConfig::default());
}

#[test]
fn nested_yaml_sections() {
    let yaml = r#"
column_widths: [12, 18]
width_policy:
  max: 40
csv:
  delimiter: ";"
  line_ending: lf
  write_bom: false
"#;
    let options: ExportOptions = serde_saphyr::from_str(yaml).unwrap();

    assert_eq!(options.column_widths, Some(vec![12, 18]));
    assert_eq!(options.width_policy.max, 40);
    assert_eq!(options.width_policy.min, 10);
    assert_eq!(options.csv.delimiter, ';');
    assert_eq!(options.csv.line_ending, LineEnding::Lf);
    assert!(!options.csv.write_bom);

    let file = Exporter::new(options)
        .with_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        .export_csv(&table(), "schedule");
    assert_eq!(file.bytes, b"Month;Payment\n1;536.82\n");
}

#[test]
fn formats_deserialize_by_name() {
    let formats: Vec<ExportFormat> = serde_saphyr::from_str("[csv, xlsx]").unwrap();
    assert_eq!(formats, vec![ExportFormat::Csv, ExportFormat::Xlsx]);
}

#[test]
fn save_in_writes_named_files() {
    let dir = tempfile::tempdir().unwrap();
    let exporter =
        Exporter::new(ExportOptions::default()).with_date(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());

    for format in [ExportFormat::Csv, ExportFormat::Xlsx] {
        let file = exporter.export(&table(), "Loan Schedule", format).unwrap();
        let path = file.save_in(dir.path()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("Loan_Schedule_2023-12-01.{}", format.extension())
        );
        assert_eq!(std::fs::read(&path).unwrap(), file.bytes);
    }
}

#[test]
fn save_in_missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let file = Exporter::default().export_csv(&table(), "x");
    assert!(matches!(file.save_in(&missing), Err(tabex::Error::Io(_))));
}
