//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: the bordered form pane over a one-line status bar.
pub struct AppLayout {
    pub form_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // form pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            form_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// The form pane minus its border — the coordinate space rows render
    /// into, shared with mouse hit-testing.
    pub fn form_inner(&self) -> Rect {
        Rect::new(
            self.form_area.x + 1,
            self.form_area.y + 1,
            self.form_area.width.saturating_sub(2),
            self.form_area.height.saturating_sub(2),
        )
    }
}
