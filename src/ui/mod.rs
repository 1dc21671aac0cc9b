//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into pixels on
//! the terminal.  No engine mutation happens here.

pub mod badge;
pub mod form;
pub mod layout;
pub mod theme;

use ratatui::{
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::state::AppState;
use crate::core::summary::SUMMARY_HEADER;

use self::badge::ThemeBadge;
use self::form::FormWidget;
use self::layout::AppLayout;
use self::theme::Theme;

/// Key hints shown in the status bar when nothing else claims it.
pub const STATUS_HINT: &str = "Tab/↑↓: move  Enter/Space: select  Ctrl+T: theme  Esc: quit";

/// Draw one frame.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let theme = Theme::new(state.dark_mode);
    let layout = AppLayout::from_area(frame.area());

    let block = Block::default()
        .title(format!(" {SUMMARY_HEADER} "))
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_style(theme.border_style());

    let widget = FormWidget::new(&state.splitter, theme, state.copied_until.is_some()).block(block);
    frame.render_stateful_widget(widget, layout.form_area, &mut state.form);

    frame.render_widget(ThemeBadge { dark: state.dark_mode, theme }, layout.form_area);

    let status = if let Some(ref msg) = state.status_message {
        msg.as_str()
    } else if state.copied() {
        "Summary copied to clipboard"
    } else {
        STATUS_HINT
    };
    frame.render_widget(
        Paragraph::new(status).style(theme.status_bar_style()),
        layout.status_area,
    );
}
