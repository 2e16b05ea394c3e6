//! File validation and format detection.
//!
//! Checks that a path can be read before the loader spends time decoding it, and decides
//! whether the bytes are a delimited text file or a workbook.

use crate::error::{BrowserError, Result};
use std::path::Path;

/// Spreadsheets larger than this are refused outright; the whole file is read into memory.
pub const MAX_SPREADSHEET_SIZE: u64 = 256 * 1024 * 1024;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// On-disk layout of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Delimited text with a header row.
    Csv,
    /// Any workbook calamine can open (xlsx, xlsm, xlsb, xls, ods).
    Workbook,
}

impl SheetFormat {
    /// Pick a format from the file extension, falling back to magic numbers.
    ///
    /// Files with no recognised extension are treated as workbooks when they start with a
    /// ZIP or compound-document signature and as CSV otherwise.
    pub fn detect(path: &Path, head: &[u8]) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") | Some("txt") => Ok(SheetFormat::Csv),
            Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("xla")
            | Some("xlam") | Some("ods") => Ok(SheetFormat::Workbook),
            None => Ok(Self::sniff(head)),
            Some(_) if head.starts_with(ZIP_MAGIC) || head.starts_with(CFB_MAGIC) => {
                Ok(SheetFormat::Workbook)
            }
            Some(_) => Err(BrowserError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn sniff(head: &[u8]) -> Self {
        if head.starts_with(ZIP_MAGIC) || head.starts_with(CFB_MAGIC) {
            SheetFormat::Workbook
        } else {
            SheetFormat::Csv
        }
    }
}

/// Validate that a path points at a readable, reasonably sized regular file.
///
/// # Error Cases
/// - Path does not exist
/// - Path is a directory or other non-file
/// - Metadata cannot be read
/// - File exceeds [`MAX_SPREADSHEET_SIZE`]
///
/// A zero-byte file passes: for CSV it is a valid sheet with no rows.
pub fn validate_file_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(BrowserError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| BrowserError::file_error("Failed to read file metadata", e))?;

    if !metadata.is_file() {
        return Err(BrowserError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() > MAX_SPREADSHEET_SIZE {
        return Err(BrowserError::file_error(
            format!(
                "File is too large ({}MB): {}",
                metadata.len() / (1024 * 1024),
                path.display()
            ),
            std::io::Error::new(std::io::ErrorKind::InvalidData, "File too large"),
        ));
    }

    Ok(())
}
