//! Command handlers tying the pipeline together.
//!
//! [`Browser`] owns the record store and everything the table depends on. The host (the
//! terminal application, or a test) calls one method per user event; each method runs to
//! completion and leaves the browser in a renderable state. Failures never escape: they turn
//! into a [`FileStatus`] or a queued [`Notice`].

use crate::dataset::{LoadTicket, Record, RecordStore};
use crate::error::BrowserError;
use crate::filter::{apply_filters, derive_options, Dimension, FilterSelection, OptionSets};
use crate::render::table::{render, DisplayTable};
use crate::search::{
    live_search, strict_search, validate_with, Feedback, LiveOutcome, StrictOutcome,
    MIN_SEARCH_LENGTH,
};

/// File status line: idle / in progress, success, or error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Idle(String),
    Success(String),
    Error(String),
}

impl FileStatus {
    pub fn message(&self) -> &str {
        match self {
            FileStatus::Idle(m) | FileStatus::Success(m) | FileStatus::Error(m) => m,
        }
    }
}

impl Default for FileStatus {
    fn default() -> Self {
        FileStatus::Idle("Belum ada file dipilih.".to_string())
    }
}

/// A message for the user raised by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The file could not be decoded. Blocking.
    ParseFailed { detail: String },
    /// A submitted search was not all digits or too short. Blocking.
    SearchRejected { min_length: usize },
    /// A valid submitted search found nothing. Informational.
    NotFound { query: String },
}

impl Notice {
    /// Blocking notices must be acknowledged before the user continues.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Notice::NotFound { .. })
    }

    pub fn message(&self) -> String {
        match self {
            Notice::ParseFailed { .. } => {
                "Terjadi kesalahan saat membaca file Excel. Pastikan nama kolom sudah benar."
                    .to_string()
            }
            Notice::SearchRejected { min_length } => format!(
                "Pencarian Gagal. Pastikan NIK hanya berisi angka dan memiliki minimal {min_length} digit."
            ),
            Notice::NotFound { query } => {
                format!("NIK \"{query}\" tidak ditemukan di seluruh data.")
            }
        }
    }
}

/// Which rows the table currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Display {
    /// The filtered view, whatever it currently is.
    Filtered,
    /// Search matches, as dataset indices.
    Results(Vec<usize>),
}

/// The filter/search/display pipeline behind the UI.
#[derive(Debug)]
pub struct Browser {
    store: RecordStore,
    options: OptionSets,
    selection: FilterSelection,
    search_text: String,
    feedback: Feedback,
    display: Display,
    status: FileStatus,
    notices: Vec<Notice>,
    min_search_length: usize,
}

impl Default for Browser {
    fn default() -> Self {
        Self::new()
    }
}

impl Browser {
    pub fn new() -> Self {
        Self::with_min_search_length(MIN_SEARCH_LENGTH)
    }

    pub fn with_min_search_length(min_search_length: usize) -> Self {
        Self {
            store: RecordStore::new(),
            options: OptionSets::default(),
            selection: FilterSelection::all(),
            search_text: String::new(),
            feedback: Feedback::default(),
            display: Display::Filtered,
            status: FileStatus::default(),
            notices: Vec::new(),
            min_search_length,
        }
    }

    // --- file loading ---

    /// A file was chosen; its contents will arrive through [`Browser::finish_load`].
    pub fn begin_load(&mut self, file_name: &str) -> LoadTicket {
        self.status = FileStatus::Idle(format!("File: {file_name} - Sedang diproses..."));
        let ticket = self.store.begin_load();
        log::info!(
            "loading {file_name} (generation {})",
            ticket.generation()
        );
        ticket
    }

    /// The file chooser was dismissed without a file.
    pub fn cancel_load(&mut self) {
        self.status = FileStatus::Idle("Unggahan dibatalkan.".to_string());
    }

    /// Apply the outcome of a load started with `ticket`.
    ///
    /// Returns `false` when the ticket was superseded by a newer load; nothing changes then.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        file_name: &str,
        result: Result<Vec<Record>, BrowserError>,
    ) -> bool {
        if !self.store.is_current(ticket) {
            log::debug!("ignoring result of superseded load of {file_name}");
            return false;
        }

        match result {
            Err(error) => {
                log::warn!("failed to load {file_name}: {error}");
                self.status = FileStatus::Error(
                    "Gagal memproses file Excel. Pastikan format kolom benar.".to_string(),
                );
                self.notices.push(Notice::ParseFailed {
                    detail: error.to_string(),
                });
            }
            Ok(rows) if rows.is_empty() => {
                log::info!("{file_name} loaded with no rows");
                self.store.complete_load(ticket, rows);
                self.options = OptionSets::default();
                self.status = FileStatus::Error(
                    "File dimuat, namun tidak ada data ditemukan.".to_string(),
                );
                self.reset_view_state();
            }
            Ok(rows) => {
                let count = rows.len();
                self.store.complete_load(ticket, rows);
                self.options = derive_options(self.store.all());
                self.status = FileStatus::Success(format!(
                    "File: {file_name} ({count} data dimuat)."
                ));
                self.reset_view_state();
                log::info!("{file_name} loaded with {count} rows");
            }
        }
        true
    }

    fn reset_view_state(&mut self) {
        self.selection = FilterSelection::all();
        self.clear_search();
        self.refilter();
    }

    // --- filtering ---

    /// Set one filter control. Clears the search box and shows the new filtered view.
    pub fn select_filter(&mut self, dimension: Dimension, value: Option<String>) {
        self.selection.set(dimension, value);
        self.clear_search();
        self.refilter();
        log::debug!(
            "filter {:?} -> {:?}: {} rows",
            dimension,
            self.selection.get(dimension),
            self.store.filtered_indices().len()
        );
    }

    /// Step a filter control through "all" followed by its options, wrapping around.
    pub fn cycle_filter(&mut self, dimension: Dimension, forward: bool) {
        let options = self.options.get(dimension);
        let slots = options.len() + 1;
        let current = self
            .selection
            .get(dimension)
            .and_then(|value| options.iter().position(|o| o == value))
            .map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        let value = next.checked_sub(1).map(|i| options[i].clone());
        self.select_filter(dimension, value);
    }

    /// Clear all three filters and the search box.
    pub fn reset_filters(&mut self) {
        self.selection = FilterSelection::all();
        self.clear_search();
        self.refilter();
    }

    fn refilter(&mut self) {
        let indices = apply_filters(self.store.all(), &self.selection);
        self.store.set_filtered(indices);
        self.display = Display::Filtered;
    }

    fn clear_search(&mut self) {
        self.search_text.clear();
        self.feedback = validate_with("", self.min_search_length);
    }

    // --- searching ---

    /// The search box changed: update feedback and run the live search.
    pub fn input_changed(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.feedback = validate_with(text, self.min_search_length);

        match live_search(self.store.all(), text) {
            LiveOutcome::ShowFiltered => self.display = Display::Filtered,
            LiveOutcome::Unchanged => {}
            LiveOutcome::Matches(indices) => self.display = Display::Results(indices),
        }
    }

    /// The user submitted the search box.
    pub fn submit_search(&mut self) {
        match strict_search(self.store.all(), &self.search_text, self.min_search_length) {
            StrictOutcome::ShowFiltered => self.display = Display::Filtered,
            StrictOutcome::Rejected { .. } => {
                self.notices.push(Notice::SearchRejected {
                    min_length: self.min_search_length,
                });
                self.display = Display::Filtered;
            }
            StrictOutcome::Matches { query, indices } => {
                if indices.is_empty() {
                    self.notices.push(Notice::NotFound { query });
                }
                self.display = Display::Results(indices);
            }
        }
    }

    // --- views ---

    /// Render the rows currently on display.
    pub fn table(&self) -> DisplayTable {
        render(&self.displayed_rows())
    }

    pub fn displayed_rows(&self) -> Vec<&Record> {
        match &self.display {
            Display::Filtered => self.store.current_filtered_view(),
            Display::Results(indices) => self.store.resolve(indices),
        }
    }

    /// Drain the notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn options(&self) -> &OptionSets {
        &self.options
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn status(&self) -> &FileStatus {
        &self.status
    }

    pub fn min_search_length(&self) -> usize {
        self.min_search_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::{NAMA, NIK, RT, RW, WILAYAH};

    fn rows() -> Vec<Record> {
        vec![
            Record::new()
                .with(NAMA, "Siti")
                .with(NIK, "312345678901")
                .with(WILAYAH, "Cibinong")
                .with(RW, "01")
                .with(RT, 1i64),
            Record::new()
                .with(NAMA, "Budi")
                .with(NIK, "329900001111")
                .with(WILAYAH, "Bojong")
                .with(RW, "02")
                .with(RT, 2i64),
            Record::new()
                .with(NAMA, "Ani")
                .with(NIK, "321234000000")
                .with(WILAYAH, "Cibinong")
                .with(RW, "02")
                .with(RT, 10i64),
        ]
    }

    fn loaded() -> Browser {
        let mut browser = Browser::new();
        let ticket = browser.begin_load("penerima.xlsx");
        assert!(browser.finish_load(ticket, "penerima.xlsx", Ok(rows())));
        browser
    }

    #[test]
    fn test_initial_status_is_idle() {
        let browser = Browser::new();
        assert_eq!(
            browser.status(),
            &FileStatus::Idle("Belum ada file dipilih.".to_string())
        );
        assert!(browser.table().is_placeholder());
    }

    #[test]
    fn test_successful_load() {
        let browser = loaded();
        assert_eq!(
            browser.status(),
            &FileStatus::Success("File: penerima.xlsx (3 data dimuat).".to_string())
        );
        assert_eq!(browser.table().row_count(), 3);
        assert_eq!(browser.options().rt, vec!["1", "2", "10"]);
        assert_eq!(browser.options().region, vec!["Bojong", "Cibinong"]);
    }

    #[test]
    fn test_empty_load_reports_error_status() {
        let mut browser = loaded();
        let ticket = browser.begin_load("kosong.csv");
        browser.finish_load(ticket, "kosong.csv", Ok(Vec::new()));

        assert!(matches!(browser.status(), FileStatus::Error(_)));
        assert!(browser.table().is_placeholder());
        assert!(browser.store().is_empty());
        assert!(browser.take_notices().is_empty());
    }

    #[test]
    fn test_parse_failure_keeps_previous_dataset() {
        let mut browser = loaded();
        let ticket = browser.begin_load("rusak.xlsx");
        browser.finish_load(ticket, "rusak.xlsx", Err(BrowserError::parse("bad zip")));

        assert!(matches!(browser.status(), FileStatus::Error(_)));
        assert_eq!(browser.store().len(), 3);
        let notices = browser.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_blocking());
    }

    #[test]
    fn test_superseded_load_is_ignored() {
        let mut browser = Browser::new();
        let first = browser.begin_load("lama.xlsx");
        let second = browser.begin_load("baru.xlsx");

        assert!(browser.finish_load(second, "baru.xlsx", Ok(rows()[..1].to_vec())));
        assert!(!browser.finish_load(first, "lama.xlsx", Ok(rows())));
        assert_eq!(browser.store().len(), 1);
        assert!(matches!(browser.status(), FileStatus::Success(m) if m.contains("baru.xlsx")));
    }

    #[test]
    fn test_cancel_load() {
        let mut browser = Browser::new();
        browser.cancel_load();
        assert_eq!(
            browser.status(),
            &FileStatus::Idle("Unggahan dibatalkan.".to_string())
        );
    }

    #[test]
    fn test_filter_clears_search() {
        let mut browser = loaded();
        browser.input_changed("3299");
        assert_eq!(browser.table().row_count(), 1);

        browser.select_filter(Dimension::Region, Some("Cibinong".into()));
        assert_eq!(browser.search_text(), "");
        assert_eq!(browser.feedback(), Feedback::default());
        assert_eq!(browser.display(), &Display::Filtered);
        assert_eq!(browser.table().row_count(), 2);
    }

    #[test]
    fn test_options_do_not_shrink_under_filter() {
        let mut browser = loaded();
        let before = browser.options().clone();
        browser.select_filter(Dimension::Rw, Some("01".into()));
        assert_eq!(browser.options(), &before);
    }

    #[test]
    fn test_cycle_filter_wraps_through_all() {
        let mut browser = loaded();
        browser.cycle_filter(Dimension::Region, true);
        assert_eq!(browser.selection().get(Dimension::Region), Some("Bojong"));
        browser.cycle_filter(Dimension::Region, true);
        assert_eq!(browser.selection().get(Dimension::Region), Some("Cibinong"));
        browser.cycle_filter(Dimension::Region, true);
        assert_eq!(browser.selection().get(Dimension::Region), None);
        browser.cycle_filter(Dimension::Region, false);
        assert_eq!(browser.selection().get(Dimension::Region), Some("Cibinong"));
    }

    #[test]
    fn test_strict_search_ignores_filter() {
        let mut browser = loaded();
        browser.select_filter(Dimension::Region, Some("Bojong".into()));
        browser.input_changed("12345678");
        browser.submit_search();

        let names: Vec<String> = browser
            .displayed_rows()
            .iter()
            .map(|r| r.text_or_empty(NAMA))
            .collect();
        assert_eq!(names, vec!["Siti"]);
        assert!(browser.take_notices().is_empty());
    }

    #[test]
    fn test_rejected_search_reverts_to_filtered_view() {
        let mut browser = loaded();
        browser.select_filter(Dimension::Rw, Some("02".into()));
        browser.input_changed("1234567");
        assert_eq!(browser.table().row_count(), 1);

        browser.submit_search();
        assert_eq!(browser.display(), &Display::Filtered);
        assert_eq!(browser.table().row_count(), 2);
        assert_eq!(
            browser.take_notices(),
            vec![Notice::SearchRejected { min_length: 8 }]
        );
    }

    #[test]
    fn test_not_found_is_informational() {
        let mut browser = loaded();
        browser.input_changed("99999999");
        browser.submit_search();

        assert!(browser.table().is_placeholder());
        let notices = browser.take_notices();
        assert_eq!(
            notices,
            vec![Notice::NotFound {
                query: "99999999".into()
            }]
        );
        assert!(!notices[0].is_blocking());
    }

    #[test]
    fn test_live_search_keeps_display_on_invalid_input() {
        let mut browser = loaded();
        browser.input_changed("3212");
        assert_eq!(browser.table().row_count(), 1);

        browser.input_changed("3212x");
        assert_eq!(browser.table().row_count(), 1);
        assert!(!browser.feedback().is_all_digits);
        assert!(browser.take_notices().is_empty());

        browser.input_changed("");
        assert_eq!(browser.display(), &Display::Filtered);
        assert_eq!(browser.table().row_count(), 3);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut browser = loaded();
        browser.select_filter(Dimension::Rt, Some("10".into()));
        browser.input_changed("32");
        browser.reset_filters();

        assert!(browser.selection().is_empty());
        assert_eq!(browser.search_text(), "");
        assert_eq!(browser.table().row_count(), 3);
    }

    #[test]
    fn test_search_results_renumber() {
        let mut browser = loaded();
        browser.input_changed("00");
        let positions: Vec<usize> = browser.table().rows().iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2]);
    }
}
