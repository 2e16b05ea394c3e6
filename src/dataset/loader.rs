//! Spreadsheet decoding into [`Record`]s.
//!
//! Only the first sheet of a workbook is read. The first row supplies the field names; every
//! following non-blank row becomes one record. Empty cells are left out of the record rather
//! than stored as blanks, so "missing" and "empty" look the same to the rest of the pipeline.

use crate::dataset::record::{CellValue, Record};
use crate::dataset::validation::{validate_file_path, SheetFormat};
use crate::error::{BrowserError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

/// Header name used for columns whose header cell is blank.
const BLANK_HEADER: &str = "__EMPTY";

/// Read and decode a spreadsheet from disk.
///
/// Blocking; the application runs this on a blocking worker.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    validate_file_path(path)?;

    let bytes = std::fs::read(path).map_err(|e| {
        BrowserError::file_error(format!("Failed to read file: {}", path.display()), e)
    })?;

    let format = SheetFormat::detect(path, &bytes)?;
    log::debug!(
        "decoding {} ({} bytes) as {:?}",
        path.display(),
        bytes.len(),
        format
    );

    match format {
        SheetFormat::Csv => parse_csv(&bytes),
        SheetFormat::Workbook if bytes.is_empty() => Err(BrowserError::EmptyFile {
            path: path.to_path_buf(),
        }),
        SheetFormat::Workbook => parse_workbook(bytes),
    }
}

/// Decode delimited text. The delimiter is `;` when the header line has semicolons but no
/// commas (a common regional CSV export), `,` otherwise.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(sniff_delimiter(bytes))
        .from_reader(bytes);

    let mut rows = reader.records();
    let header = match rows.next() {
        Some(record) => record?,
        None => return Ok(Vec::new()),
    };
    let headers = HeaderNames::from_cells(header.iter().map(str::to_string));

    let mut records = Vec::new();
    for result in rows {
        let row = result?;
        let mut record = Record::new();
        for (column, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            record.insert(headers.name(column), CellValue::Text(cell.to_string()));
        }
        if !record.is_empty() {
            records.push(record);
        }
    }

    Ok(records)
}

/// Decode the first worksheet of an xlsx/xls/xlsb/ods workbook held in memory.
pub fn parse_workbook(bytes: Vec<u8>) -> Result<Vec<Record>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(BrowserError::parse("workbook contains no sheets")),
    };

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(cells) => HeaderNames::from_cells(cells.iter().map(|c| convert_cell(c).to_string())),
        None => return Ok(Vec::new()),
    };

    let records = rows
        .filter_map(|cells| {
            let mut record = Record::new();
            for (column, cell) in cells.iter().enumerate() {
                let value = convert_cell(cell);
                if value == CellValue::Empty {
                    continue;
                }
                record.insert(headers.name(column), value);
            }
            (!record.is_empty()).then_some(record)
        })
        .collect();

    Ok(records)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // Serial date numbers, matching what spreadsheet apps report for raw values
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{e:?}")),
    }
}

fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    if commas == 0 && semicolons > 0 {
        b';'
    } else {
        b','
    }
}

/// Column names taken from the header row.
///
/// Blank headers become `__EMPTY`, `__EMPTY_1`, ...; repeated headers get `_1`, `_2`, ...
/// appended so every column keeps its own key.
struct HeaderNames {
    names: Vec<String>,
}

impl HeaderNames {
    fn from_cells(cells: impl Iterator<Item = String>) -> Self {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let names = cells
            .map(|raw| {
                let base = if raw.is_empty() {
                    BLANK_HEADER.to_string()
                } else {
                    raw
                };
                let count = seen.entry(base.clone()).or_insert(0);
                let name = if *count == 0 {
                    base.clone()
                } else {
                    format!("{base}_{count}")
                };
                *count += 1;
                name
            })
            .collect();
        Self { names }
    }

    /// Name for a column, including cells past the end of the header row.
    fn name(&self, column: usize) -> String {
        self.names
            .get(column)
            .cloned()
            .unwrap_or_else(|| format!("{BLANK_HEADER}_{column}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::{NAMA, NIK, RT, WILAYAH};
    use std::io::Write;

    #[test]
    fn test_parse_csv_maps_headers() {
        let csv = "NAMA,NIK,WILAYAH,RT\nSiti,3201234567890001,Cibinong,1\nBudi,3201234567890002,Bojong,2\n";
        let records = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(NAMA), Some(&CellValue::from("Siti")));
        assert_eq!(
            records[1].get(NIK),
            Some(&CellValue::from("3201234567890002"))
        );
        assert_eq!(records[1].text_or_empty(WILAYAH), "Bojong");
    }

    #[test]
    fn test_parse_csv_omits_empty_cells_and_blank_rows() {
        let csv = "NAMA,RT,RW\nSiti,,02\n,,\nBudi,3,\n";
        let records = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].get(RT).is_none());
        assert_eq!(records[0].len(), 2);
        assert_eq!(records[1].text_or_empty(RT), "3");
    }

    #[test]
    fn test_parse_csv_header_only_is_empty_dataset() {
        assert!(parse_csv(b"NAMA,NIK\n").unwrap().is_empty());
        assert!(parse_csv(b"").unwrap().is_empty());
    }

    #[test]
    fn test_parse_csv_semicolon_delimited() {
        let records = parse_csv(b"NAMA;RT\nSiti;4\n").unwrap();
        assert_eq!(records[0].text_or_empty(RT), "4");
    }

    #[test]
    fn test_header_names_dedup_and_blank() {
        let headers = HeaderNames::from_cells(
            ["NAMA", "", "NAMA", "", "RT"].iter().map(|s| s.to_string()),
        );
        assert_eq!(headers.name(0), "NAMA");
        assert_eq!(headers.name(1), "__EMPTY");
        assert_eq!(headers.name(2), "NAMA_1");
        assert_eq!(headers.name(3), "__EMPTY_1");
        assert_eq!(headers.name(4), "RT");
        assert_eq!(headers.name(7), "__EMPTY_7");
    }

    #[test]
    fn test_extra_cells_get_positional_names() {
        let records = parse_csv(b"NAMA\nSiti,extra\n").unwrap();
        assert_eq!(
            records[0].get("__EMPTY_1"),
            Some(&CellValue::from("extra"))
        );
    }

    #[test]
    fn test_convert_cell_types() {
        assert_eq!(convert_cell(&Data::Float(7.0)), CellValue::Float(7.0));
        assert_eq!(convert_cell(&Data::Int(3)), CellValue::Int(3));
        assert_eq!(convert_cell(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_load_records_from_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "NAMA,NIK\nSiti,3201\n").unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text_or_empty(NIK), "3201");
    }

    #[test]
    fn test_load_records_garbage_workbook_is_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"this is not a zip archive").unwrap();

        let result = load_records(file.path());
        assert!(matches!(result, Err(BrowserError::ParseError { .. })));
    }

    #[test]
    fn test_load_records_empty_workbook_file() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let result = load_records(file.path());
        assert!(matches!(result, Err(BrowserError::EmptyFile { .. })));
    }
}
