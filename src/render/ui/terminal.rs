//! Terminal UI implementation using ratatui
//!
//! This module provides the concrete implementation of UIRenderer using ratatui
//! for cross-platform terminal interface. It only draws what `ViewState` holds; input is read
//! by the input service on its own thread.

use crate::error::Result;
use crate::input::Focus;
use crate::render::table::{DisplayTable, NavigationCell};
use crate::render::ui::{ColorTheme, UIRenderer, ViewState};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const COLUMN_WIDTHS: [Constraint; 8] = [
    Constraint::Length(5),
    Constraint::Fill(3),
    Constraint::Fill(4),
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Length(4),
    Constraint::Length(4),
    Constraint::Fill(3),
];

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    fn base_style(theme: &ColorTheme) -> Style {
        match theme.normal_text {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        }
    }

    fn render_filter_bar(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let mut spans = Vec::new();
        for control in &view_state.filters {
            let style = if view_state.focus == Focus::Filter(control.dimension) {
                theme.focused
            } else {
                Self::base_style(theme)
            };
            spans.push(Span::raw(format!("{}: ", control.dimension.label())));
            spans.push(Span::styled(format!("< {} >", control.value), style));
            spans.push(Span::raw(format!(" ({})   ", control.option_count)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_search_box(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let box_style = if view_state.focus == Focus::Search {
            theme.focused
        } else {
            Self::base_style(theme)
        };
        let indicator = |ok: bool, label: String| {
            let (mark, color) = if ok {
                ("✓", theme.ok_text)
            } else {
                ("✗", theme.error_text)
            };
            Span::styled(format!("  {mark} {label}"), Style::default().fg(color))
        };

        let line = Line::from(vec![
            Span::raw("Cari NIK: "),
            Span::styled(format!("{:<20}", view_state.search_text), box_style),
            indicator(view_state.feedback.is_all_digits, "1. Hanya berisi angka".to_string()),
            indicator(
                view_state.feedback.meets_min_length,
                format!("2. Minimal {} digit", view_state.min_search_length),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_table(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let header = Row::new(DisplayTable::headers()).style(theme.header);

        if let DisplayTable::Empty { message } = &view_state.table {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(area);
            frame.render_widget(Table::new(Vec::<Row>::new(), COLUMN_WIDTHS).header(header), chunks[0]);
            frame.render_widget(
                Paragraph::new(message.as_str())
                    .alignment(Alignment::Center)
                    .style(Self::base_style(theme)),
                chunks[1],
            );
            return;
        }

        let rows: Vec<Row> = view_state
            .table
            .rows()
            .iter()
            .skip(view_state.scroll_offset)
            .take(view_state.lines_per_page())
            .map(|row| {
                let mut cells = Vec::with_capacity(row.cells.len() + 2);
                cells.push(Cell::from(row.position.to_string()));
                cells.extend(row.cells.iter().map(|text| Cell::from(text.as_str())));
                cells.push(match &row.navigation {
                    NavigationCell::Link(url) => Cell::from(url.as_str()).style(theme.link),
                    NavigationCell::LinkError => {
                        Cell::from("Link Error").style(Style::default().fg(theme.error_text))
                    }
                });
                Row::new(cells).style(Self::base_style(theme))
            })
            .collect();

        frame.render_widget(Table::new(rows, COLUMN_WIDTHS).header(header), area);
    }

    /// Render status line using theme colors (helper for closure)
    fn render_status_with_data(
        frame: &mut Frame,
        area: Rect,
        view_state: &ViewState,
        theme: &ColorTheme,
    ) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view_state.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }

    fn render_modal(frame: &mut Frame, message: &str, theme: &ColorTheme) {
        let area = centered_rect(60, 7, frame.size());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Peringatan ")
            .title_bottom(Line::from(" Esc untuk menutup ").alignment(Alignment::Right));
        let popup = Paragraph::new(message)
            .block(block)
            .wrap(Wrap { trim: true })
            .style(theme.modal);

        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

/// A rectangle `percent_x` wide and `height` tall in the middle of `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width.saturating_mul(percent_x) / 100;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            // Extract theme before closure to avoid borrowing issues
            let theme = &self.theme;

            terminal.draw(move |frame| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Min(0),
                        Constraint::Length(1),
                    ])
                    .split(frame.size());

                Self::render_filter_bar(frame, chunks[0], view_state, theme);
                Self::render_search_box(frame, chunks[1], view_state, theme);
                Self::render_table(frame, chunks[2], view_state, theme);
                Self::render_status_with_data(frame, chunks[3], view_state, theme);

                if let Some(message) = &view_state.modal {
                    Self::render_modal(frame, message, theme);
                }
            })?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUI::new().unwrap();
        assert!(ui.terminal.is_none());
        assert_eq!(ui.theme.status_bg, Color::Blue);

        let ui_with_theme = TerminalUI::with_theme(ColorTheme::monochrome()).unwrap();
        assert_eq!(ui_with_theme.theme.status_bg, Color::Black);
    }

    #[test]
    fn test_render_without_terminal_is_noop() {
        let mut ui = TerminalUI::new().unwrap();
        assert!(ui.render(&ViewState::new(80, 24)).is_ok());
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 7, area);
        assert_eq!(popup, Rect::new(20, 16, 60, 7));

        let tiny = centered_rect(60, 7, Rect::new(0, 0, 10, 3));
        assert_eq!(tiny.height, 3);
        assert_eq!(tiny.y, 0);
    }
}
