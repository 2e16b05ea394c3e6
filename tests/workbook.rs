use std::path::PathBuf;

use beneficiary_browser::browser::Browser;
use beneficiary_browser::dataset::record::{NAMA, NIK, RW, WILAYAH};
use beneficiary_browser::dataset::{load_records, CellValue};
use beneficiary_browser::filter::{derive_options, Dimension};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn reads_first_sheet_and_skips_blank_rows() {
    let records = load_records(&fixture("penerima.xlsx")).expect("fixture loads");

    // Row 3 of the sheet is blank and the second sheet is never read
    assert_eq!(records.len(), 2);
    let names: Vec<String> = records.iter().map(|r| r.text_or_empty(NAMA)).collect();
    assert_eq!(names, ["Siti", "Budi"]);
}

#[test]
fn numeric_cells_become_digit_strings() {
    let records = load_records(&fixture("penerima.xlsx")).unwrap();

    assert!(matches!(records[0].get(NIK), Some(CellValue::Float(_))));
    assert_eq!(records[0].text_or_empty(NIK), "3201010101010001");
    assert_eq!(records[0].text_or_empty(RW), "3");
    // Typed as text in the sheet, kept as text
    assert_eq!(
        records[1].get(NIK),
        Some(&CellValue::from("3201010101010002"))
    );
}

#[test]
fn boolean_cells_display_lowercase() {
    let records = load_records(&fixture("penerima.xlsx")).unwrap();

    assert_eq!(records[0].text_or_empty("AKTIF"), "true");
    assert_eq!(records[1].text_or_empty("AKTIF"), "false");
}

#[test]
fn workbook_rows_feed_filters_and_search() {
    let records = load_records(&fixture("penerima.xlsx")).unwrap();

    let options = derive_options(&records);
    assert_eq!(options.get(Dimension::Region), ["Selatan", "Utara"]);
    assert_eq!(options.get(Dimension::Rw), ["3", "12"]);
    assert_eq!(records[1].text_or_empty(WILAYAH), "Selatan");

    let mut browser = Browser::new();
    let ticket = browser.begin_load("penerima.xlsx");
    assert!(browser.finish_load(ticket, "penerima.xlsx", Ok(records)));

    browser.input_changed("3201010101010001");
    browser.submit_search();
    let found: Vec<String> = browser
        .displayed_rows()
        .iter()
        .map(|r| r.text_or_empty(NAMA))
        .collect();
    assert_eq!(found, ["Siti"]);
}
