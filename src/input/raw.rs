//! Low-level input collection: crossterm polling and translation into primitive events that
//! the input service can consume.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent, MouseEvent, MouseEventKind};
use std::collections::VecDeque;
use std::time::Duration;

/// Number of table rows moved by a single mouse wheel tick.
const MOUSE_SCROLL_LINES: usize = 3;
/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize {
        width: u16,
        height: u16,
    },
    Scroll {
        direction: ScrollDirection,
        lines: usize,
    },
}

/// Collector that polls crossterm and queues the events we care about.
#[derive(Debug, Default)]
pub struct RawInputCollector {
    pending_events: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a synthetic event (primarily used by unit tests).
    pub fn process_event(&mut self, event: Event) {
        if let Some(raw) = translate(event) {
            self.pending_events.push_back(raw);
        }
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.pop_pending() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if !event::poll(poll_timeout)? {
            return Ok(None);
        }

        self.process_event(event::read()?);
        Ok(self.pop_pending())
    }

    /// Pop the next queued event without polling the terminal.
    pub fn pop_pending(&mut self) -> Option<RawInputEvent> {
        self.pending_events.pop_front()
    }
}

fn translate(event: Event) -> Option<RawInputEvent> {
    match event {
        Event::Key(key_event) => Some(RawInputEvent::Key(key_event)),
        Event::Resize(width, height) => Some(RawInputEvent::Resize { width, height }),
        Event::Mouse(mouse_event) => translate_mouse(mouse_event),
        _ => None,
    }
}

fn translate_mouse(mouse_event: MouseEvent) -> Option<RawInputEvent> {
    let direction = match mouse_event.kind {
        MouseEventKind::ScrollUp => ScrollDirection::Up,
        MouseEventKind::ScrollDown => ScrollDirection::Down,
        _ => return None,
    };
    Some(RawInputEvent::Scroll {
        direction,
        lines: MOUSE_SCROLL_LINES,
    })
}
