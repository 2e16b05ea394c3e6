//! Dataset loading and storage.
//!
//! Parses an uploaded spreadsheet into [`Record`]s and keeps them, together with the active
//! filtered view, in a single owned [`RecordStore`].

pub mod loader;
pub mod record;
pub mod store;
pub mod validation;
pub mod worker;

pub use loader::{load_records, parse_csv, parse_workbook};
pub use record::{CellValue, Record};
pub use store::{LoadTicket, RecordStore};
pub use validation::{validate_file_path, SheetFormat};
pub use worker::load_worker_loop;
