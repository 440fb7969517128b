//! XLSX output reopened with an independent ZIP reader.

use std::io::{Cursor, Read};

use chrono::NaiveDate;
use tabex::xlsx::{PART_CONTENT_TYPES, PART_WORKSHEET};
use tabex::{to_xlsx, Cell, ExportOptions, Exporter, Table};
use zip::CompressionMethod;

fn scenario() -> Table {
    Table::from_rows([
        vec![Cell::from("Type"), Cell::from("Amount")],
        vec![Cell::from("Income"), Cell::from(1200)],
        vec![Cell::from("Note"), Cell::from("=SUM(A1:A2)")],
    ])
}

fn open(bytes: &[u8]) -> zip::ZipArchive<Cursor<&[u8]>> {
    zip::ZipArchive::new(Cursor::new(bytes)).expect("archive opens")
}

fn read_part(archive: &mut zip::ZipArchive<Cursor<&[u8]>>, name: &str) -> String {
    let mut file = archive.by_name(name).expect("part exists");
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();
    text
}

/// Values of every `name="..."` attribute, in document order.
fn attribute_values(xml: &str, name: &str) -> Vec<String> {
    let needle = format!(r#" {name}=""#);
    xml.match_indices(&needle)
        .filter_map(|(start, _)| {
            let value = &xml[start + needle.len()..];
            value.find('"').map(|end| value[..end].to_string())
        })
        .collect()
}

#[test]
fn parts_are_stored_in_order() {
    let bytes = to_xlsx(&scenario()).unwrap();
    let mut archive = open(&bytes);

    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(
        names,
        [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ]
    );

    for i in 0..archive.len() {
        let file = archive.by_index(i).unwrap();
        assert_eq!(file.compression(), CompressionMethod::Stored);
        assert_eq!(file.size(), file.compressed_size());
    }
}

#[test]
fn contents_and_checksums_verify() {
    let bytes = to_xlsx(&scenario()).unwrap();
    let mut archive = open(&bytes);
    // Reading to the end makes the zip crate check each CRC-32.
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut sink = Vec::new();
        file.read_to_end(&mut sink).unwrap();
        assert_eq!(sink.len() as u64, file.size());
        assert_eq!(file.crc32(), tabex_zip::crc32(&sink));
    }
}

#[test]
fn worksheet_holds_guarded_text() {
    let bytes = to_xlsx(&scenario()).unwrap();
    let mut archive = open(&bytes);
    let sheet = read_part(&mut archive, PART_WORKSHEET);

    assert!(sheet.contains(r#"<dimension ref="A1:B3"/>"#));
    assert!(sheet.contains(r#"<c r="B3" t="inlineStr"><is><t>&apos;=SUM(A1:A2)</t></is></c>"#));
    assert!(sheet.contains(r#"<c r="B2"><v>1200</v></c>"#));
    assert!(!sheet.contains("<f>"));
}

#[test]
fn every_override_and_target_exists() {
    let bytes = to_xlsx(&scenario()).unwrap();
    let mut archive = open(&bytes);
    let content_types = read_part(&mut archive, PART_CONTENT_TYPES);

    for part_name in attribute_values(&content_types, "PartName") {
        let path = part_name.trim_start_matches('/');
        assert!(archive.by_name(path).is_ok(), "missing override part {path}");
    }

    let root_rels = read_part(&mut archive, "_rels/.rels");
    for target in attribute_values(&root_rels, "Target") {
        assert!(archive.by_name(&target).is_ok(), "missing root target {target}");
    }

    let workbook_rels = read_part(&mut archive, "xl/_rels/workbook.xml.rels");
    for target in attribute_values(&workbook_rels, "Target") {
        let path = format!("xl/{target}");
        assert!(archive.by_name(&path).is_ok(), "missing workbook target {path}");
    }
}

#[test]
fn empty_table_is_a_valid_workbook() {
    let bytes = to_xlsx(&Table::new()).unwrap();
    let mut archive = open(&bytes);
    let sheet = read_part(&mut archive, PART_WORKSHEET);
    assert!(sheet.contains(r#"<dimension ref="A1:A1"/>"#));
    assert!(sheet.contains("<sheetData></sheetData>"));
}

#[test]
fn sheet_name_and_options_reach_the_package() {
    let options = ExportOptions::default()
        .with_sheet_name("Loan [draft]: 2024")
        .with_freeze_header(false);
    let file = Exporter::new(options)
        .with_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        .export_xlsx(&scenario(), "loan")
        .unwrap();
    assert_eq!(file.file_name, "loan_2024-01-31.xlsx");

    let mut archive = open(&file.bytes);
    let workbook = read_part(&mut archive, "xl/workbook.xml");
    assert!(workbook.contains(r#"<sheet name="Loan draft 2024" sheetId="1" r:id="rId1"/>"#));
    let sheet = read_part(&mut archive, PART_WORKSHEET);
    assert!(!sheet.contains("<pane"));
}

#[test]
fn identical_input_gives_identical_bytes() {
    assert_eq!(to_xlsx(&scenario()).unwrap(), to_xlsx(&scenario()).unwrap());
}
