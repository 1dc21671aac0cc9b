//! Input handling — maps key/mouse events to state mutations.
//!
//! The handler rebuilds the same form rows the renderer draws, so focus
//! traversal and mouse hit-testing always agree with what is on screen.

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::clipboard;
use crate::core::bill::{BillItem, ItemId};
use crate::core::summary;
use crate::ui::badge;
use crate::ui::form::{self, FieldId, FormRow};
use crate::ui::layout::AppLayout;

use super::state::AppState;

/// Process a key event.  Only press events arrive here; releases and
/// repeats are filtered at the reader.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
        state.toggle_theme();
        return;
    }

    match key.code {
        KeyCode::Esc => state.should_quit = true,
        KeyCode::Tab | KeyCode::Down => focus_step(state, 1),
        KeyCode::BackTab | KeyCode::Up => focus_step(state, -1),
        KeyCode::Enter => match state.form.focused {
            // Enter in a text field moves on, like tabbing through a form.
            Some(field) if field.is_text() => focus_step(state, 1),
            Some(field) => activate(state, field),
            None => focus_step(state, 1),
        },
        KeyCode::Char(' ') if !focused_is_text(state) => {
            if let Some(field) = state.form.focused {
                activate(state, field);
            }
        }
        KeyCode::Char('q') if !focused_is_text(state) && key.modifiers.is_empty() => {
            state.should_quit = true;
        }
        KeyCode::Char(c)
            if focused_is_text(state)
                && (key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT) =>
        {
            insert_char(state, c);
        }
        KeyCode::Backspace if focused_is_text(state) => delete_back(state),
        KeyCode::Delete if focused_is_text(state) => delete_forward(state),
        KeyCode::Left => {
            if focused_is_text(state) {
                move_cursor_left(state);
            } else {
                focus_step(state, -1);
            }
        }
        KeyCode::Right => {
            if focused_is_text(state) {
                move_cursor_right(state);
            } else {
                focus_step(state, 1);
            }
        }
        KeyCode::Home if focused_is_text(state) => state.form.cursor = 0,
        KeyCode::End if focused_is_text(state) => {
            state.form.cursor = focused_text(state).map(|t| t.len()).unwrap_or(0);
        }
        _ => {}
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = AppLayout::from_area(state.terminal_area);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let badge = badge::badge_rect(layout.form_area, state.dark_mode);
            if point_in_rect(badge, mouse.column, mouse.row) {
                state.toggle_theme();
                return;
            }

            let inner = layout.form_inner();
            let rows = build_rows(state);
            if let Some(field) =
                form::hit_test(&rows, inner, state.form.offset, mouse.column, mouse.row)
            {
                set_focus(state, Some(field));
                // Clicking a button or checkbox also activates it.
                if !field.is_text() {
                    activate(state, field);
                }
            }
        }
        MouseEventKind::ScrollUp => focus_step(state, -1),
        MouseEventKind::ScrollDown => focus_step(state, 1),
        _ => {}
    }
}

// ── activation ──────────────────────────────────────────────────

fn activate(state: &mut AppState, field: FieldId) {
    match field {
        FieldId::AddParticipant => {
            let idx = state.splitter.add_participant();
            tracing::debug!("added participant #{idx}");
        }
        FieldId::AddItem => {
            let id = state.splitter.add_item();
            tracing::debug!("added item {id}");
        }
        FieldId::ItemCommon(id) => {
            if let Some(pos) = position_of(state, id) {
                let checked = state
                    .splitter
                    .bill
                    .get(pos)
                    .map(|item| item.is_common)
                    .unwrap_or(false);
                state.splitter.set_common(pos, !checked);
            }
        }
        FieldId::QuickSplit(id, preset) => {
            if let Some(pos) = position_of(state, id) {
                if state.splitter.apply_quick_split(pos, preset) {
                    tracing::debug!("applied preset {preset} to item at {pos}");
                }
            }
        }
        FieldId::Assign(id, participant) => {
            // Ticking the last unticked box re-derives the item as common,
            // which hides the assignment rows — re-anchor focus if so.
            let anchor = flattened_index(state, field);
            if let Some(pos) = position_of(state, id) {
                state.splitter.toggle_assignment(pos, participant);
            }
            ensure_focus(state, anchor);
        }
        FieldId::RemoveItem(id) => {
            let anchor = flattened_index(state, field);
            if let Some(pos) = position_of(state, id) {
                state.splitter.remove_item(pos);
            }
            ensure_focus(state, anchor);
        }
        FieldId::CopySummary => copy_summary(state),
        FieldId::Reset => {
            state.splitter.reset();
            state.copied_until = None;
            state.status_message = None;
            state.form.focused = None;
            state.form.cursor = 0;
            state.form.offset = 0;
            tracing::debug!("reset to seed state");
        }
        // Text fields are edited, not activated.
        FieldId::RosterName(_) | FieldId::ItemName(_) | FieldId::ItemPrice(_) => {}
    }
}

fn copy_summary(state: &mut AppState) {
    let text = summary::summary_text(&state.splitter);
    match clipboard::copy_text(&text) {
        Ok(()) => {
            state.status_message = None;
            state.flash_copied();
            tracing::debug!("summary copied ({} bytes)", text.len());
        }
        Err(err) => {
            state.status_message = Some(format!("Copy failed: {err}"));
        }
    }
}

// ── focus ───────────────────────────────────────────────────────

fn build_rows(state: &AppState) -> Vec<FormRow> {
    form::build_rows(&state.splitter, state.copied())
}

fn focused_is_text(state: &AppState) -> bool {
    state.form.focused.is_some_and(FieldId::is_text)
}

/// Move focus by `delta` through the focusable cells, wrapping.
fn focus_step(state: &mut AppState, delta: i32) {
    let fields = form::focusable_fields(&build_rows(state));
    if fields.is_empty() {
        return;
    }
    let len = fields.len() as i32;
    let next = match state
        .form
        .focused
        .and_then(|f| fields.iter().position(|&x| x == f))
    {
        Some(idx) => (((idx as i32 + delta) % len + len) % len) as usize,
        None if delta >= 0 => 0,
        None => fields.len() - 1,
    };
    set_focus(state, Some(fields[next]));
}

/// Switch focus, running the roster focus-in/blur rules on the way.
fn set_focus(state: &mut AppState, new: Option<FieldId>) {
    if state.form.focused == new {
        return;
    }
    if let Some(FieldId::RosterName(idx)) = state.form.focused {
        state.splitter.roster.end_name_edit(idx);
    }
    state.form.focused = new;
    if let Some(FieldId::RosterName(idx)) = new {
        state.splitter.roster.begin_name_edit(idx);
    }
    state.form.cursor = new
        .and_then(|field| field_text(state, field))
        .map(|text| text.len())
        .unwrap_or(0);
}

/// After a structural edit, re-anchor focus if its field vanished.
fn ensure_focus(state: &mut AppState, anchor: Option<usize>) {
    let fields = form::focusable_fields(&build_rows(state));
    if let Some(field) = state.form.focused {
        if fields.contains(&field) {
            return;
        }
    }
    let idx = anchor.unwrap_or(0).min(fields.len().saturating_sub(1));
    set_focus(state, fields.get(idx).copied());
}

fn flattened_index(state: &AppState, field: FieldId) -> Option<usize> {
    form::focusable_fields(&build_rows(state))
        .iter()
        .position(|&f| f == field)
}

// ── text editing ────────────────────────────────────────────────

fn item_of(state: &AppState, id: ItemId) -> Option<&BillItem> {
    state
        .splitter
        .bill
        .position_of(id)
        .and_then(|pos| state.splitter.bill.get(pos))
}

fn position_of(state: &AppState, id: ItemId) -> Option<usize> {
    state.splitter.bill.position_of(id)
}

fn field_text(state: &AppState, field: FieldId) -> Option<String> {
    match field {
        FieldId::RosterName(idx) => state.splitter.roster.get(idx).map(|p| p.name.clone()),
        FieldId::ItemName(id) => item_of(state, id).map(|item| item.name.clone()),
        FieldId::ItemPrice(id) => item_of(state, id).map(|item| item.price.clone()),
        _ => None,
    }
}

fn focused_text(state: &AppState) -> Option<String> {
    state.form.focused.and_then(|field| field_text(state, field))
}

fn set_field_text(state: &mut AppState, field: FieldId, text: &str) {
    match field {
        FieldId::RosterName(idx) => state.splitter.roster.rename(idx, text),
        FieldId::ItemName(id) => {
            if let Some(pos) = position_of(state, id) {
                state.splitter.bill.set_name(pos, text);
            }
        }
        FieldId::ItemPrice(id) => {
            if let Some(pos) = position_of(state, id) {
                state.splitter.bill.set_price(pos, text);
            }
        }
        _ => {}
    }
}

fn insert_char(state: &mut AppState, c: char) {
    let Some(field) = state.form.focused else { return };
    let Some(mut text) = field_text(state, field) else { return };
    if let Some(cap) = field.input_cap() {
        if text.chars().count() >= cap {
            return;
        }
    }
    let cursor = state.form.cursor.min(text.len());
    text.insert(cursor, c);
    state.form.cursor = cursor + c.len_utf8();
    set_field_text(state, field, &text);
}

fn delete_back(state: &mut AppState) {
    let Some(field) = state.form.focused else { return };
    let Some(mut text) = field_text(state, field) else { return };
    let cursor = state.form.cursor.min(text.len());
    if cursor == 0 {
        return;
    }
    let prev = text[..cursor]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0);
    text.drain(prev..cursor);
    state.form.cursor = prev;
    set_field_text(state, field, &text);
}

fn delete_forward(state: &mut AppState) {
    let Some(field) = state.form.focused else { return };
    let Some(mut text) = field_text(state, field) else { return };
    let cursor = state.form.cursor.min(text.len());
    if cursor >= text.len() {
        return;
    }
    let next = text[cursor..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| cursor + i)
        .unwrap_or(text.len());
    text.drain(cursor..next);
    set_field_text(state, field, &text);
}

fn move_cursor_left(state: &mut AppState) {
    let Some(text) = focused_text(state) else { return };
    let cursor = state.form.cursor.min(text.len());
    if cursor > 0 {
        state.form.cursor = text[..cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
    }
}

fn move_cursor_right(state: &mut AppState) {
    let Some(text) = focused_text(state) else { return };
    let cursor = state.form.cursor.min(text.len());
    if cursor < text.len() {
        state.form.cursor = text[cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| cursor + i)
            .unwrap_or(text.len());
    }
}

// ── helpers ─────────────────────────────────────────────────────

fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
