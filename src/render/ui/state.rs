//! UI state management structures
//!
//! This module contains what the terminal needs to draw one frame. The filter/search pipeline
//! lives in [`Browser`]; `ViewState` holds a rendered snapshot of it plus the purely visual
//! state (focus, scroll position, prompt, popup).

use crate::browser::{Browser, FileStatus};
use crate::filter::Dimension;
use crate::input::Focus;
use crate::render::table::DisplayTable;
use crate::search::Feedback;

/// Rows taken by everything except the table body: filter bar, search box, table header,
/// status line.
pub const CHROME_LINES: u16 = 4;

/// One filter control as shown in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    pub dimension: Dimension,
    /// Selected option, or the dimension's "all" label.
    pub value: String,
    pub option_count: usize,
}

/// Everything needed to draw a frame
#[derive(Debug)]
pub struct ViewState {
    pub table: DisplayTable,
    pub filters: Vec<FilterControl>,
    pub search_text: String,
    pub feedback: Feedback,
    pub min_search_length: usize,
    pub file_status: FileStatus,

    /// Control holding keyboard focus
    pub focus: Focus,

    /// Index of the first table row in the viewport
    pub scroll_offset: usize,

    pub status_line: StatusLine,

    /// Blocking notice that must be dismissed before anything else happens
    pub modal: Option<String>,

    /// Viewport dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(viewport_width: u16, viewport_height: u16) -> Self {
        Self {
            table: DisplayTable::Rows(Vec::new()),
            filters: Dimension::ALL
                .iter()
                .map(|&dimension| FilterControl {
                    dimension,
                    value: dimension.all_label().to_string(),
                    option_count: 0,
                })
                .collect(),
            search_text: String::new(),
            feedback: Feedback::default(),
            min_search_length: 0,
            file_status: FileStatus::default(),
            focus: Focus::Search,
            scroll_offset: 0,
            status_line: StatusLine::new(),
            modal: None,
            viewport_width,
            viewport_height,
        }
    }

    /// Snapshot everything the browser shows. The scroll position is clamped, not reset.
    pub fn refresh(&mut self, browser: &Browser) {
        self.table = browser.table();
        for control in &mut self.filters {
            control.value = browser
                .selection()
                .get(control.dimension)
                .unwrap_or(control.dimension.all_label())
                .to_string();
            control.option_count = browser.options().get(control.dimension).len();
        }
        self.search_text = browser.search_text().to_string();
        self.feedback = browser.feedback();
        self.min_search_length = browser.min_search_length();
        self.file_status = browser.status().clone();
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Table body rows that fit on screen
    pub fn lines_per_page(&self) -> usize {
        self.viewport_height.saturating_sub(CHROME_LINES).max(1) as usize
    }

    fn max_scroll(&self) -> usize {
        self.table.rows().len().saturating_sub(self.lines_per_page())
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let target = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.scroll_offset.saturating_add(delta as usize)
        };
        self.scroll_offset = target.min(self.max_scroll());
    }

    pub fn go_to_start(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn go_to_end(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Update terminal dimensions
    /// Returns true if dimensions actually changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;

        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
            self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        }

        changed
    }

    /// "first-last/total" for the visible slice of the table
    pub fn format_position(&self) -> String {
        let total = self.table.rows().len();
        if total == 0 {
            return "0 data".to_string();
        }
        let first = self.scroll_offset + 1;
        let last = (self.scroll_offset + self.lines_per_page()).min(total);
        format!("{first}-{last}/{total}")
    }

    /// Format the complete status line for this view state
    pub fn format_status_line(&self) -> String {
        self.status_line
            .format_status_line(self.file_status.message(), &self.format_position())
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
    pub file_prompt: Option<String>,
}

impl StatusLine {
    /// Create a new status line
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Clear any temporary message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn set_file_prompt(&mut self) {
        self.file_prompt = Some(String::new());
    }

    pub fn update_file_prompt(&mut self, buffer: String) {
        self.file_prompt = Some(buffer);
    }

    pub fn clear_file_prompt(&mut self) {
        self.file_prompt = None;
    }

    pub fn format_status_line(&self, file_status: &str, position: &str) -> String {
        if let Some(buffer) = &self.file_prompt {
            format!("Buka file: {buffer}")
        } else if let Some(message) = &self.message {
            format!("{file_status} | {position} | {message}")
        } else {
            format!("{file_status} | {position}")
        }
    }
}
