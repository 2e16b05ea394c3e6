//! NIK search over the full dataset.
//!
//! Both entry points ignore the active filter selection: a match anywhere in the dataset is
//! shown even if its region is filtered out.

use crate::dataset::record::NIK;
use crate::dataset::Record;
use crate::search::validator::is_digits;

/// Result of an explicitly submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrictOutcome {
    /// Query was blank: show the filtered view again.
    ShowFiltered,
    /// Query is not all digits or too short; show the filtered view and tell the user.
    Rejected { query: String },
    /// Dataset indices whose NIK contains the query. May be empty ("not found").
    Matches { query: String, indices: Vec<usize> },
}

/// Result of a keystroke-driven search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveOutcome {
    /// Input is blank: show the filtered view.
    ShowFiltered,
    /// Input contains a non-digit; leave the display as it is.
    Unchanged,
    /// Dataset indices whose NIK contains the input.
    Matches(Vec<usize>),
}

/// Indices of rows whose NIK is set and contains `needle`.
pub fn nik_matches(dataset: &[Record], needle: &str) -> Vec<usize> {
    dataset
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            record
                .truthy_text(NIK)
                .is_some_and(|nik| nik.contains(needle))
        })
        .map(|(index, _)| index)
        .collect()
}

/// Validated search triggered by the submit key.
pub fn strict_search(dataset: &[Record], query: &str, min_length: usize) -> StrictOutcome {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return StrictOutcome::ShowFiltered;
    }

    if !is_digits(&query) || query.len() < min_length {
        log::debug!("rejecting search query {query:?}");
        return StrictOutcome::Rejected { query };
    }

    let indices = nik_matches(dataset, &query);
    log::debug!("search {query:?} matched {} rows", indices.len());
    StrictOutcome::Matches { query, indices }
}

/// Permissive search run on every edit of the search box. No length threshold applies.
pub fn live_search(dataset: &[Record], text: &str) -> LiveOutcome {
    let text = text.trim();
    if text.is_empty() {
        return LiveOutcome::ShowFiltered;
    }
    if !is_digits(text) {
        return LiveOutcome::Unchanged;
    }
    LiveOutcome::Matches(nik_matches(dataset, text))
}
