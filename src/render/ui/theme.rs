//! Color theme and styling definitions using ratatui colors
//!
//! This module provides color themes for terminal rendering using ratatui's
//! color system directly to avoid unnecessary abstractions.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Normal text color (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Table header row
    pub header: Style,

    /// Control that currently has keyboard focus
    pub focused: Style,

    /// Navigation links in the table
    pub link: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Satisfied search criterion / successful load
    pub ok_text: Color,

    /// Error/warning text
    pub error_text: Color,

    /// Notice popup
    pub modal: Style,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None, // Use terminal default
            header: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            focused: Style::default().fg(Color::Black).bg(Color::Yellow),
            link: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
            status_bg: Color::Blue,
            status_fg: Color::White,
            ok_text: Color::Green,
            error_text: Color::Red,
            modal: Style::default().fg(Color::White).bg(Color::Red),
        }
    }
}

impl ColorTheme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => Self::default(),
            ThemeName::Monochrome => Self::monochrome(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            header: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            focused: Style::default().fg(Color::Black).bg(Color::White),
            link: Style::default().add_modifier(Modifier::UNDERLINED),
            status_bg: Color::Black,
            status_fg: Color::White,
            ok_text: Color::White,
            error_text: Color::White,
            modal: Style::default().fg(Color::Black).bg(Color::White),
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            normal_text: Some(Color::White),
            header: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            focused: Style::default().fg(Color::Black).bg(Color::LightYellow),
            link: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
            status_bg: Color::White,
            status_fg: Color::Black,
            ok_text: Color::LightGreen,
            error_text: Color::LightRed,
            modal: Style::default().fg(Color::White).bg(Color::Black),
        }
    }
}
