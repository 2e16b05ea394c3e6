//! Row model for parsed spreadsheets.
//!
//! A [`Record`] is an open-ended mapping from header name to [`CellValue`]. Nothing about the
//! expected columns is enforced: a sheet with unknown headers loads fine, and a row missing
//! `NIK` or `RT` simply has no entry for that key.

use std::collections::BTreeMap;
use std::fmt;

/// Name of the beneficiary column.
pub const NAMA: &str = "NAMA";
/// Full street address.
pub const ALAMAT_LENGKAP: &str = "ALAMAT_LENGKAP";
/// Kind of aid received.
pub const JENIS_BANTUAN: &str = "JENIS_BANTUAN";
/// Administrative region.
pub const WILAYAH: &str = "WILAYAH";
/// Sub-neighbourhood unit.
pub const RT: &str = "RT";
/// Neighbourhood unit.
pub const RW: &str = "RW";
/// National identity number.
pub const NIK: &str = "NIK";
/// Map link used by the navigation column.
pub const LINK_GPS: &str = "LINK_GPS";

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Whether the value counts as "set" for filtering and search.
    ///
    /// Zero, `false`, NaN, empty text and empty cells are all unset.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Bool(b) => *b,
            CellValue::Int(i) => *i != 0,
            CellValue::Float(f) => *f != 0.0 && !f.is_nan(),
            CellValue::Text(s) => !s.is_empty(),
        }
    }

    /// String coercion used everywhere a cell is compared or displayed.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => f.write_str("true"),
            CellValue::Bool(false) => f.write_str("false"),
            CellValue::Int(i) => write!(f, "{i}"),
            // Spreadsheets store most numbers as floats; whole values print without ".0"
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

/// One row of the uploaded sheet, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    /// The field's string coercion, or `""` when it is missing or falsy.
    ///
    /// This is the comparison key used by the filter engine.
    pub fn text_or_empty(&self, field: &str) -> String {
        match self.get(field) {
            Some(value) if value.is_truthy() => value.to_display_string(),
            _ => String::new(),
        }
    }

    /// The field's string coercion only when it is present and truthy.
    pub fn truthy_text(&self, field: &str) -> Option<String> {
        self.get(field)
            .filter(|value| value.is_truthy())
            .map(CellValue::to_display_string)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
