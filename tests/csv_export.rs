//! CSV output checked against an independent CSV parser.

use proptest::prelude::*;
use tabex::{to_csv_bytes, to_csv_string, Cell, CsvConfig, Table, UTF8_BOM};

fn parse(text: &str, delimiter: u8) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes())
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn scenario_round_trips_with_guard() {
    let table = Table::from_rows([
        vec![Cell::from("Type"), Cell::from("Amount")],
        vec![Cell::from("Income"), Cell::from(1200)],
        vec![Cell::from("Note"), Cell::from("=SUM(A1:A2)")],
    ]);
    let bytes = to_csv_bytes(&table, &CsvConfig::default());
    assert_eq!(&bytes[..3], &UTF8_BOM);

    let text = std::str::from_utf8(&bytes[3..]).unwrap();
    assert_eq!(text, "Type,Amount\r\nIncome,1200\r\nNote,'=SUM(A1:A2)\r\n");
    assert_eq!(
        parse(text, b','),
        vec![
            vec!["Type", "Amount"],
            vec!["Income", "1200"],
            vec!["Note", "'=SUM(A1:A2)"],
        ]
    );
}

#[test]
fn awkward_text_round_trips() {
    let awkward = [
        "comma, inside",
        "quote \" inside",
        "\"fully quoted\"",
        "multi\nline",
        "windows\r\nline",
        "  padded  ",
        "tab\tinside",
        "ünïcödé ✓",
    ];
    let table = Table::from_rows([awkward]);
    let text = to_csv_string(&table, &CsvConfig::default());
    assert_eq!(parse(&text, b','), vec![awkward.to_vec()]);
}

#[test]
fn tsv_round_trips() {
    let table = Table::from_rows([vec!["a\tb", "c,d"], vec!["e", "f"]]);
    let text = to_csv_string(&table, &CsvConfig::tsv());
    assert_eq!(parse(&text, b'\t'), vec![vec!["a\tb", "c,d"], vec!["e", "f"]]);
}

#[test]
fn ragged_and_typed_cells() {
    let table = Table::from_rows([
        vec![Cell::from("h1"), Cell::from("h2"), Cell::from("h3")],
        vec![Cell::Bool(true), Cell::Number(f64::NAN)],
        vec![Cell::from(0.1)],
    ]);
    let text = to_csv_string(&table, &CsvConfig::default());
    assert_eq!(
        parse(&text, b','),
        vec![vec!["h1", "h2", "h3"], vec!["TRUE", ""], vec!["0.1"]]
    );
}

proptest! {
    #[test]
    fn text_survives_csv_parsing(rows in proptest::collection::vec(
        proptest::collection::vec("[a-zA-Z0-9 ,\"\r\n;.]{1,12}", 1..6), 1..8)
    ) {
        let table = Table::from_rows(rows.clone());
        let text = to_csv_string(&table, &CsvConfig::default());
        prop_assert_eq!(parse(&text, b','), rows);
    }
}
