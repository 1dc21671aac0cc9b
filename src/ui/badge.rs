//! Theme badge — a small clickable mode indicator rendered in the top-right
//! corner of the form pane, on the border row.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Label for the current display mode.
pub fn badge_label(dark: bool) -> &'static str {
    if dark {
        " ☾ dark "
    } else {
        " ☀ light "
    }
}

/// Where the badge sits inside `area`.  Used by both rendering and mouse
/// hit-testing.
pub fn badge_rect(area: Rect, dark: bool) -> Rect {
    let width = badge_label(dark).chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width + 2);
    Rect::new(x, area.y, width, 1)
}

/// Current display mode indicator.  Clicking it flips the theme.
pub struct ThemeBadge {
    pub dark: bool,
    pub theme: Theme,
}

impl Widget for ThemeBadge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 16 || area.height == 0 {
            return;
        }
        let rect = badge_rect(area, self.dark);
        let line = Line::from(Span::styled(badge_label(self.dark), self.theme.badge_style()));
        buf.set_line(rect.x, rect.y, &line, rect.width);
    }
}
