//! # beneficiary-browser - Terminal Browser for Aid Beneficiary Spreadsheets
//!
//! Loads a beneficiary spreadsheet (xlsx/xls/ods or CSV) and lets the user narrow it down by
//! region, RW, and RT, or look people up by NIK.
//!
//! ## Features
//!
//! - **Spreadsheet Loading**: first worksheet of any format calamine reads, plus CSV
//! - **Region Filters**: three independent exact-match filters with sorted options
//! - **NIK Search**: live substring search while typing, validated search on submit
//! - **Terminal UI**: scrollable table with a navigation link column
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`dataset`] - Spreadsheet parsing, records, and the record store
//! - [`filter`] - Option derivation and filter application
//! - [`search`] - Input validation and NIK search
//! - [`browser`] - Command handlers tying the pipeline together
//! - [`render`] - Display table projection and the terminal front end
//! - [`input`] - Key bindings and terminal event collection
//! - [`app`] - Application core and component coordination

// Core modules
pub mod config;
pub mod error;

// Data pipeline
pub mod browser;
pub mod dataset;
pub mod filter;
pub mod search;

// Front end
pub mod app;
pub mod input;
pub mod render;

// Re-export commonly used types for convenience
pub use error::{BrowserError, Result};

// Public API surface for external usage
pub use app::Application;
pub use browser::{Browser, FileStatus, Notice};
pub use config::{BrowserConfig, ThemeName};
pub use dataset::{load_records, CellValue, Record};
pub use render::table::DisplayTable;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
