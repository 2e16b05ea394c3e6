//! High-level input service.
//!
//! The input thread only collects raw terminal events. The focus-based key state machine runs
//! on the render loop, next to the browser it edits, and turns those events into domain-level
//! `InputAction`s there.

use crate::error::Result;
use crate::filter::Dimension;
use crate::input::raw::{RawInputCollector, RawInputEvent, ScrollDirection};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Control holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Filter(Dimension),
}

impl Focus {
    const ORDER: [Focus; 4] = [
        Focus::Search,
        Focus::Filter(Dimension::Region),
        Focus::Filter(Dimension::Rw),
        Focus::Filter(Dimension::Rt),
    ];

    fn step(self, forward: bool) -> Focus {
        let len = Self::ORDER.len();
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Self::ORDER[next]
    }
}

/// Current input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Browsing(Focus),
    FilePrompt { previous: Focus },
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Scroll {
        direction: ScrollDirection,
        lines: usize,
    },
    PageUp,
    PageDown,
    GoToStart,
    GoToEnd,
    Quit,
    FocusChanged(Focus),
    CycleFilter {
        dimension: Dimension,
        forward: bool,
    },
    InsertSearchChar(char),
    DeleteSearchChar,
    SubmitSearch,
    ResetFilters,
    StartFilePrompt,
    UpdateFilePrompt(String),
    SubmitFilePrompt(String),
    CancelFilePrompt,
    Dismiss,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
    InvalidInput,
}

/// Key bindings for the browser.
///
/// Search editing keys are emitted as edits; the search text itself lives in the browser. Only
/// the focus and the file prompt path are held here.
pub struct InputStateMachine {
    state: InputState,
    path_buffer: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Browsing(Focus::Search),
            path_buffer: String::new(),
        }
    }

    /// Map one raw event to an action, updating focus and prompt state.
    pub fn handle_event(&mut self, event: RawInputEvent) -> InputAction {
        match event {
            RawInputEvent::Key(key_event) => self.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Scroll { direction, lines } => InputAction::Scroll { direction, lines },
        }
    }

    /// Map a raw event while a popup is open. Only quit, dismiss, and resize are recognised and
    /// the machine's own state is left alone.
    pub fn handle_blocked_event(&self, event: RawInputEvent) -> InputAction {
        match event {
            RawInputEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                match key_event.code {
                    KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                        InputAction::Quit
                    }
                    KeyCode::Esc => InputAction::Dismiss,
                    _ => InputAction::NoAction,
                }
            }
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            _ => InputAction::NoAction,
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        let (code, modifiers) = (key_event.code, key_event.modifiers);
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return InputAction::Quit;
        }

        match self.state {
            InputState::FilePrompt { previous } => self.handle_prompt_key(previous, code, modifiers),
            InputState::Browsing(focus) => self.handle_browsing_key(focus, code, modifiers),
        }
    }

    fn handle_browsing_key(
        &mut self,
        focus: Focus,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> InputAction {
        let plain = !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match (focus, code) {
            (_, KeyCode::Char('o')) if modifiers.contains(KeyModifiers::CONTROL) => {
                self.state = InputState::FilePrompt { previous: focus };
                self.path_buffer.clear();
                InputAction::StartFilePrompt
            }
            (_, KeyCode::Char('r')) if modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::ResetFilters
            }
            (_, KeyCode::Tab) => self.move_focus(focus.step(true)),
            (_, KeyCode::BackTab) => self.move_focus(focus.step(false)),
            (_, KeyCode::Up) => InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines: 1,
            },
            (_, KeyCode::Down) => InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            },
            (_, KeyCode::PageUp) => InputAction::PageUp,
            (_, KeyCode::PageDown) => InputAction::PageDown,
            (_, KeyCode::Home) => InputAction::GoToStart,
            (_, KeyCode::End) => InputAction::GoToEnd,
            (_, KeyCode::Esc) => InputAction::Dismiss,

            (Focus::Search, KeyCode::Enter) => InputAction::SubmitSearch,
            (Focus::Search, KeyCode::Backspace) => InputAction::DeleteSearchChar,
            (Focus::Search, KeyCode::Char(ch)) if plain && !ch.is_control() => {
                InputAction::InsertSearchChar(ch)
            }

            (Focus::Filter(dimension), KeyCode::Left | KeyCode::Char('h')) if plain => {
                InputAction::CycleFilter {
                    dimension,
                    forward: false,
                }
            }
            (Focus::Filter(dimension), KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter)
                if plain =>
            {
                InputAction::CycleFilter {
                    dimension,
                    forward: true,
                }
            }
            (Focus::Filter(_), KeyCode::Char('q')) if plain => InputAction::Quit,

            _ => InputAction::InvalidInput,
        }
    }

    fn handle_prompt_key(
        &mut self,
        previous: Focus,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> InputAction {
        match code {
            KeyCode::Esc => {
                self.state = InputState::Browsing(previous);
                self.path_buffer.clear();
                InputAction::CancelFilePrompt
            }
            KeyCode::Enter => {
                self.state = InputState::Browsing(previous);
                let path = std::mem::take(&mut self.path_buffer);
                if path.trim().is_empty() {
                    InputAction::CancelFilePrompt
                } else {
                    InputAction::SubmitFilePrompt(path.trim().to_string())
                }
            }
            KeyCode::Backspace => {
                self.path_buffer.pop();
                InputAction::UpdateFilePrompt(self.path_buffer.clone())
            }
            KeyCode::Char(ch)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.path_buffer.push(ch);
                InputAction::UpdateFilePrompt(self.path_buffer.clone())
            }
            _ => InputAction::InvalidInput,
        }
    }

    fn move_focus(&mut self, focus: Focus) -> InputAction {
        self.state = InputState::Browsing(focus);
        InputAction::FocusChanged(focus)
    }

    /// Control with keyboard focus. While the file prompt is open this is the control that
    /// regains focus when the prompt closes.
    pub fn focus(&self) -> Focus {
        match self.state {
            InputState::Browsing(focus) | InputState::FilePrompt { previous: focus } => focus,
        }
    }

    pub fn get_state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service that drains terminal events for the render loop.
pub struct InputService {
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            raw_input: RawInputCollector::new(),
        }
    }

    /// Wait up to `timeout` for terminal input and return everything that is ready.
    pub fn poll_events(&mut self, timeout: Option<Duration>) -> Result<Vec<RawInputEvent>> {
        let mut events = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            events.push(raw_event);
            while let Some(extra_event) = self.raw_input.pop_pending() {
                events.push(extra_event);
            }
        }

        Ok(events)
    }

    pub fn process_event(&mut self, event: Event) -> Vec<RawInputEvent> {
        self.raw_input.process_event(event);
        std::iter::from_fn(|| self.raw_input.pop_pending()).collect()
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards them to the render loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<RawInputEvent>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_events(Some(poll_interval)) {
                Ok(events) => {
                    for event in events {
                        if tx.send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    log::error!("input thread error: {err}");
                    break;
                }
            }
        }
    })
}
