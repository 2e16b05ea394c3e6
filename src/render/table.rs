//! Projection of rows into the display table.
//!
//! Pure: takes whatever sequence of rows the browser wants to show (filtered view or search
//! results) and produces a [`DisplayTable`]. The position column is always `1..=n` for the
//! given sequence, never a stored identifier.

use crate::dataset::record::{ALAMAT_LENGKAP, JENIS_BANTUAN, LINK_GPS, NAMA, RT, RW, WILAYAH};
use crate::dataset::{CellValue, Record};

/// Shown in place of a missing cell.
pub const MISSING_CELL: &str = "N/A";

/// Shown instead of a table when there is nothing to list.
pub const NO_DATA_MESSAGE: &str = "Tidak ada data ditemukan untuk kriteria yang anda pilih.";

/// Link values must be longer than this many characters to be navigable.
pub const MIN_LINK_LENGTH: usize = 5;

/// Data columns between the position and navigation columns: (field, header label).
pub const DATA_COLUMNS: [(&str, &str); 6] = [
    (NAMA, "Nama"),
    (ALAMAT_LENGKAP, "Alamat"),
    (JENIS_BANTUAN, "Jenis Bantuan"),
    (WILAYAH, "Wilayah"),
    (RT, "RT"),
    (RW, "RW"),
];

pub const POSITION_HEADER: &str = "No.";
pub const NAVIGATION_HEADER: &str = "Navigasi";

/// Content of the navigation column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCell {
    Link(String),
    LinkError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// 1-based position within the rendered sequence.
    pub position: usize,
    /// One entry per [`DATA_COLUMNS`] column.
    pub cells: Vec<String>,
    pub navigation: NavigationCell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayTable {
    /// Nothing to show; a single placeholder row.
    Empty { message: String },
    Rows(Vec<DisplayRow>),
}

impl DisplayTable {
    /// Header labels including the position and navigation columns.
    pub fn headers() -> Vec<&'static str> {
        std::iter::once(POSITION_HEADER)
            .chain(DATA_COLUMNS.iter().map(|(_, label)| *label))
            .chain(std::iter::once(NAVIGATION_HEADER))
            .collect()
    }

    /// Number of display rows, counting the placeholder.
    pub fn row_count(&self) -> usize {
        match self {
            DisplayTable::Empty { .. } => 1,
            DisplayTable::Rows(rows) => rows.len(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, DisplayTable::Empty { .. })
    }

    pub fn rows(&self) -> &[DisplayRow] {
        match self {
            DisplayTable::Empty { .. } => &[],
            DisplayTable::Rows(rows) => rows,
        }
    }
}

pub fn render(rows: &[&Record]) -> DisplayTable {
    if rows.is_empty() {
        return DisplayTable::Empty {
            message: NO_DATA_MESSAGE.to_string(),
        };
    }

    DisplayTable::Rows(
        rows.iter()
            .enumerate()
            .map(|(index, record)| render_row(index + 1, record))
            .collect(),
    )
}

fn render_row(position: usize, record: &Record) -> DisplayRow {
    let cells = DATA_COLUMNS
        .iter()
        .map(|(field, _)| match record.get(field) {
            Some(value) if *value != CellValue::Empty => value.to_display_string(),
            _ => MISSING_CELL.to_string(),
        })
        .collect();

    DisplayRow {
        position,
        cells,
        navigation: navigation_cell(record),
    }
}

fn navigation_cell(record: &Record) -> NavigationCell {
    match record.truthy_text(LINK_GPS) {
        Some(link) if link.chars().count() > MIN_LINK_LENGTH => NavigationCell::Link(link),
        _ => NavigationCell::LinkError,
    }
}
