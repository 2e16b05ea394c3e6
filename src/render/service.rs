//! Render coordination.
//!
//! Provides the state machine that mediates between input actions, load commands, and view
//! updates. The browser owns the data; this layer decides which browser call an action maps to
//! and keeps the visual state (focus, scroll, prompt, popup) in step with it.

use crate::browser::{Browser, Notice};
use crate::error::{BrowserError, Result};
use crate::input::{InputAction, InputStateMachine, RawInputEvent, ScrollDirection};
use crate::render::protocol::{display_name, LoadCommand, LoadResponse};
use crate::render::ui::ViewState;
use std::collections::VecDeque;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Tracks render-related state that must persist across input actions and worker responses.
pub struct RenderLoopState {
    browser: Browser,
    input: InputStateMachine,
    /// Blocking notices waiting behind the one currently on screen
    queued_notices: VecDeque<Notice>,
}

impl RenderLoopState {
    pub fn new(browser: Browser) -> Self {
        Self {
            browser,
            input: InputStateMachine::new(),
            queued_notices: VecDeque::new(),
        }
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Apply one terminal event. Returns `Ok(false)` when the application should exit.
    ///
    /// While a popup is open the key map is bypassed, so focus and the prompt stay exactly as
    /// they are on screen.
    pub async fn process_event(
        &mut self,
        event: RawInputEvent,
        view_state: &mut ViewState,
        load_tx: &mpsc::Sender<LoadCommand>,
    ) -> Result<bool> {
        let action = if view_state.modal.is_some() {
            self.input.handle_blocked_event(event)
        } else {
            self.input.handle_event(event)
        };
        let keep_running = self.process_action(action, view_state, load_tx).await?;
        view_state.focus = self.input.focus();
        Ok(keep_running)
    }

    async fn process_action(
        &mut self,
        action: InputAction,
        view_state: &mut ViewState,
        load_tx: &mpsc::Sender<LoadCommand>,
    ) -> Result<bool> {
        if view_state.modal.is_some() {
            return Ok(self.process_modal_action(action, view_state));
        }

        match action {
            InputAction::Quit => return Ok(false),
            InputAction::Scroll { direction, lines } => {
                let delta = match direction {
                    ScrollDirection::Up => -(lines as i64),
                    ScrollDirection::Down => lines as i64,
                };
                view_state.scroll_by(delta);
            }
            InputAction::PageUp => view_state.scroll_by(-(view_state.lines_per_page() as i64)),
            InputAction::PageDown => view_state.scroll_by(view_state.lines_per_page() as i64),
            InputAction::GoToStart => view_state.go_to_start(),
            InputAction::GoToEnd => view_state.go_to_end(),
            InputAction::FocusChanged(focus) => view_state.focus = focus,
            InputAction::CycleFilter { dimension, forward } => {
                self.browser.cycle_filter(dimension, forward);
                self.sync(view_state, true);
            }
            InputAction::InsertSearchChar(ch) => {
                let mut text = self.browser.search_text().to_string();
                text.push(ch);
                self.edit_search(&text, view_state);
            }
            InputAction::DeleteSearchChar => {
                let mut text = self.browser.search_text().to_string();
                if text.pop().is_some() {
                    self.edit_search(&text, view_state);
                }
            }
            InputAction::SubmitSearch => {
                self.browser.submit_search();
                self.sync(view_state, true);
            }
            InputAction::ResetFilters => {
                self.browser.reset_filters();
                self.sync(view_state, true);
            }
            InputAction::StartFilePrompt => view_state.status_line.set_file_prompt(),
            InputAction::UpdateFilePrompt(buffer) => {
                view_state.status_line.update_file_prompt(buffer)
            }
            InputAction::SubmitFilePrompt(path) => {
                view_state.status_line.clear_file_prompt();
                self.open_file(PathBuf::from(path), view_state, load_tx)
                    .await?;
            }
            InputAction::CancelFilePrompt => {
                view_state.status_line.clear_file_prompt();
                self.browser.cancel_load();
                self.sync(view_state, false);
            }
            InputAction::Dismiss => view_state.status_line.clear_message(),
            InputAction::Resize { width, height } => {
                view_state.update_terminal_size(width, height);
            }
            InputAction::NoAction | InputAction::InvalidInput => {}
        }
        Ok(true)
    }

    /// While a blocking notice is open only quitting, resizing, and dismissing get through.
    fn process_modal_action(&mut self, action: InputAction, view_state: &mut ViewState) -> bool {
        match action {
            InputAction::Quit => return false,
            InputAction::Dismiss => {
                view_state.modal = None;
                self.show_notices(view_state);
            }
            InputAction::Resize { width, height } => {
                view_state.update_terminal_size(width, height);
            }
            _ => {}
        }
        true
    }

    /// Start loading `path` in the background.
    pub async fn open_file(
        &mut self,
        path: PathBuf,
        view_state: &mut ViewState,
        load_tx: &mpsc::Sender<LoadCommand>,
    ) -> Result<()> {
        let ticket = self.browser.begin_load(&display_name(&path));
        self.sync(view_state, false);
        load_tx
            .send(LoadCommand::Load { ticket, path })
            .await
            .map_err(|_| BrowserError::other("load worker unavailable"))
    }

    pub fn handle_response(&mut self, response: LoadResponse, view_state: &mut ViewState) {
        match response {
            LoadResponse::Loaded {
                ticket,
                file_name,
                result,
            } => {
                if self.browser.finish_load(ticket, &file_name, result) {
                    self.sync(view_state, true);
                }
            }
        }
    }

    fn edit_search(&mut self, text: &str, view_state: &mut ViewState) {
        self.browser.input_changed(text);
        self.sync(view_state, true);
    }

    fn sync(&mut self, view_state: &mut ViewState, rows_changed: bool) {
        if rows_changed {
            view_state.go_to_start();
            view_state.status_line.clear_message();
        }
        view_state.refresh(&self.browser);
        self.show_notices(view_state);
    }

    /// Move queued notices into the view: the first blocking one opens the popup, the rest
    /// wait for it to be dismissed. Informational notices go to the status line.
    fn show_notices(&mut self, view_state: &mut ViewState) {
        self.queued_notices.extend(self.browser.take_notices());
        while view_state.modal.is_none() {
            let Some(notice) = self.queued_notices.pop_front() else {
                return;
            };
            if notice.is_blocking() {
                if let Notice::ParseFailed { detail } = &notice {
                    log::debug!("parse failure detail: {detail}");
                }
                view_state.modal = Some(notice.message());
            } else {
                view_state.status_line.set_message(notice.message());
            }
        }
    }
}
