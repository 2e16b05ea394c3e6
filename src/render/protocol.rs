//! Protocol definitions shared between the render coordinator and the load worker.

use crate::dataset::{LoadTicket, Record};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Commands sent from the render coordinator to the load worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadCommand {
    Load { ticket: LoadTicket, path: PathBuf },
    Shutdown,
}

/// Responses emitted by the load worker back to the coordinator.
#[derive(Debug)]
pub enum LoadResponse {
    Loaded {
        ticket: LoadTicket,
        file_name: String,
        result: Result<Vec<Record>>,
    },
}

/// Name shown to the user for a chosen file.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
