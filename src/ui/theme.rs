//! Colour palettes and text styles used across the UI.
//!
//! Two palettes exist — dark and light — selected by the persisted display
//! preference.  Change colours here and they propagate everywhere.

use ratatui::style::{Color, Modifier, Style};

/// Central theme, instantiated per frame from the current mode.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    fn text(&self) -> Color {
        if self.dark {
            Color::White
        } else {
            Color::Black
        }
    }

    fn dim(&self) -> Color {
        if self.dark {
            Color::DarkGray
        } else {
            Color::Gray
        }
    }

    fn accent(&self) -> Color {
        if self.dark {
            Color::Cyan
        } else {
            Color::Blue
        }
    }

    /// Terminal colour for a participant's palette tag.
    pub fn participant(color: (u8, u8, u8)) -> Color {
        Color::Rgb(color.0, color.1, color.2)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.dim())
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().bg(self.dim()).fg(self.text())
    }

    pub fn badge_style(&self) -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    // ── form cells ─────────────────────────────────────────────
    pub fn section_style(&self) -> Style {
        Style::default()
            .fg(self.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.text())
    }

    pub fn strong_style(&self) -> Style {
        Style::default()
            .fg(self.text())
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.dim())
    }

    pub fn field_style(&self) -> Style {
        Style::default().bg(self.dim()).fg(self.text())
    }

    pub fn field_focused_style(&self) -> Style {
        Style::default()
            .bg(self.dim())
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn placeholder_style(&self) -> Style {
        self.field_style().add_modifier(Modifier::DIM)
    }

    pub fn cursor_style(&self) -> Style {
        self.field_focused_style().add_modifier(Modifier::REVERSED)
    }

    pub fn button_style(&self) -> Style {
        Style::default().fg(self.text())
    }

    pub fn button_focused_style(&self) -> Style {
        Style::default()
            .bg(self.dim())
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn copied_style(&self) -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }
}
