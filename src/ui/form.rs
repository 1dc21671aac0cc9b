//! The bill form — rows of cells built fresh from engine state each frame.
//!
//! The row model is consumed by three parties that must agree exactly:
//! the renderer, keyboard focus traversal, and mouse hit-testing.  All
//! geometry therefore derives from [`cell_bounds`] alone.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::bill::{ItemId, MAX_ITEM_NAME_LEN, QUICK_SPLITS};
use crate::core::engine::Splitter;
use crate::core::roster::MAX_NAME_LEN;
use crate::core::summary::{format_amount, CURRENCY};

use super::theme::Theme;

/// Horizontal gap between cells in a row.
const GAP: u16 = 2;

/// Field widths (display columns).
const NAME_FIELD_WIDTH: u16 = 22;
const ITEM_NAME_FIELD_WIDTH: u16 = 32;
const PRICE_FIELD_WIDTH: u16 = 12;

// ───────────────────────────────────────── field ids ─────────

/// Every focusable thing on the form.  Items are addressed by their stable
/// id so removal can never misdirect focus; participants by position, which
/// is stable because the roster only grows or resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    RosterName(usize),
    AddParticipant,
    AddItem,
    ItemName(ItemId),
    ItemPrice(ItemId),
    ItemCommon(ItemId),
    QuickSplit(ItemId, usize),
    Assign(ItemId, usize),
    RemoveItem(ItemId),
    CopySummary,
    Reset,
}

impl FieldId {
    /// Whether this field takes typed text.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            FieldId::RosterName(_) | FieldId::ItemName(_) | FieldId::ItemPrice(_)
        )
    }

    /// Character cap applied at input time, if any.
    pub fn input_cap(self) -> Option<usize> {
        match self {
            FieldId::RosterName(_) => Some(MAX_NAME_LEN),
            FieldId::ItemName(_) => Some(MAX_ITEM_NAME_LEN),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── row model ─────────

/// Visual flavour of a cell; decides styling and decoration.
#[derive(Debug, Clone, PartialEq)]
pub enum CellKind {
    Section,
    Label,
    /// Bold label (the total line).
    Strong,
    /// Fixed-width editable text with a placeholder shown while empty.
    Text {
        width: u16,
        placeholder: &'static str,
    },
    Checkbox {
        checked: bool,
    },
    Button,
}

/// One cell in a form row.
#[derive(Debug, Clone)]
pub struct Cell {
    pub field: Option<FieldId>,
    pub text: String,
    pub kind: CellKind,
    /// Participant tag colour, where the cell represents one.
    pub color: Option<(u8, u8, u8)>,
}

impl Cell {
    fn section(text: impl Into<String>) -> Self {
        Self { field: None, text: text.into(), kind: CellKind::Section, color: None }
    }

    fn label(text: impl Into<String>) -> Self {
        Self { field: None, text: text.into(), kind: CellKind::Label, color: None }
    }

    fn strong(text: impl Into<String>) -> Self {
        Self { field: None, text: text.into(), kind: CellKind::Strong, color: None }
    }

    fn colored_label(text: impl Into<String>, color: (u8, u8, u8)) -> Self {
        Self { field: None, text: text.into(), kind: CellKind::Label, color: Some(color) }
    }

    fn text_field(
        field: FieldId,
        text: impl Into<String>,
        width: u16,
        placeholder: &'static str,
    ) -> Self {
        Self {
            field: Some(field),
            text: text.into(),
            kind: CellKind::Text { width, placeholder },
            color: None,
        }
    }

    fn checkbox(field: FieldId, label: impl Into<String>, checked: bool) -> Self {
        Self {
            field: Some(field),
            text: label.into(),
            kind: CellKind::Checkbox { checked },
            color: None,
        }
    }

    fn button(field: FieldId, label: impl Into<String>) -> Self {
        Self { field: Some(field), text: label.into(), kind: CellKind::Button, color: None }
    }

    /// Display width in terminal columns, padding included.
    pub fn width(&self) -> u16 {
        match self.kind {
            CellKind::Text { width, .. } => width,
            // "[x] label" / "[ label ]" add four columns of decoration.
            CellKind::Checkbox { .. } | CellKind::Button => self.text.width() as u16 + 4,
            _ => self.text.width() as u16,
        }
    }
}

/// One rendered row of the form.
#[derive(Debug, Clone, Default)]
pub struct FormRow {
    pub indent: u16,
    pub cells: Vec<Cell>,
}

impl FormRow {
    fn new(indent: u16, cells: Vec<Cell>) -> Self {
        Self { indent, cells }
    }

    fn blank() -> Self {
        Self::default()
    }
}

// ───────────────────────────────────────── row builder ───────

/// Build the whole form from engine state.  Called by the renderer and by
/// the input handler; both see identical rows.
pub fn build_rows(splitter: &Splitter, copied: bool) -> Vec<FormRow> {
    let mut rows = Vec::new();
    let roster_len = splitter.roster.len();

    // ── roommates ───────────────────────────────────────────────
    rows.push(FormRow::new(1, vec![
        Cell::section("Roommates"),
        Cell::button(FieldId::AddParticipant, "+ Add roommate"),
    ]));
    for (idx, p) in splitter.roster.iter().enumerate() {
        rows.push(FormRow::new(3, vec![
            Cell::colored_label("▌", p.color),
            Cell::text_field(FieldId::RosterName(idx), p.name.as_str(), NAME_FIELD_WIDTH, "Name"),
        ]));
    }
    rows.push(FormRow::blank());

    // ── bill items ──────────────────────────────────────────────
    rows.push(FormRow::new(1, vec![
        Cell::section("Bill Items"),
        Cell::button(FieldId::AddItem, "+ Add item"),
    ]));
    let show_remove = splitter.bill.len() > 1;
    for item in splitter.bill.items() {
        let mut head = vec![
            Cell::text_field(FieldId::ItemName(item.id), item.name.as_str(), ITEM_NAME_FIELD_WIDTH, "Item name"),
            Cell::label(CURRENCY),
            Cell::text_field(FieldId::ItemPrice(item.id), item.price.as_str(), PRICE_FIELD_WIDTH, "Price"),
        ];
        if show_remove {
            head.push(Cell::button(FieldId::RemoveItem(item.id), "✕ remove"));
        }
        rows.push(FormRow::new(3, head));

        rows.push(FormRow::new(3, vec![Cell::checkbox(
            FieldId::ItemCommon(item.id),
            "Split equally among all",
            item.is_common,
        )]));

        if !item.is_common {
            let mut presets = vec![Cell::label("Quick split:")];
            for (i, split) in QUICK_SPLITS.iter().enumerate() {
                presets.push(Cell::button(FieldId::QuickSplit(item.id, i), split.label));
            }
            rows.push(FormRow::new(5, presets));

            // Assignment checkboxes, three per row like a grid.
            let mut row_cells = Vec::new();
            for idx in 0..roster_len {
                let Some(p) = splitter.roster.get(idx) else { continue };
                let mut cell = Cell::checkbox(
                    FieldId::Assign(item.id, idx),
                    p.name.as_str(),
                    item.assigned.contains(&idx),
                );
                cell.color = Some(p.color);
                row_cells.push(cell);
                if row_cells.len() == 3 {
                    rows.push(FormRow::new(5, std::mem::take(&mut row_cells)));
                }
            }
            if !row_cells.is_empty() {
                rows.push(FormRow::new(5, row_cells));
            }
        }
        rows.push(FormRow::blank());
    }

    // ── summary ─────────────────────────────────────────────────
    let owed = splitter.owed_amounts();
    rows.push(FormRow::new(1, vec![Cell::section("Summary")]));
    rows.push(FormRow::new(3, vec![Cell::strong(format!(
        "Total: {}",
        format_amount(splitter.total())
    ))]));
    for (idx, amount) in owed.iter().enumerate() {
        if let Some(p) = splitter.roster.get(idx) {
            rows.push(FormRow::new(3, vec![Cell::colored_label(
                format!("▌ {}: {}", p.name, format_amount(*amount)),
                p.color,
            )]));
        }
    }
    rows.push(FormRow::blank());
    rows.push(FormRow::new(3, vec![
        Cell::button(
            FieldId::CopySummary,
            if copied { "Copied!" } else { "Copy summary" },
        ),
        Cell::button(FieldId::Reset, "Reset"),
    ]));

    rows
}

// ───────────────────────────────────────── geometry ──────────

/// Per-cell `(x, width)` bounds relative to the pane's inner origin.
pub fn cell_bounds(row: &FormRow) -> Vec<(u16, u16)> {
    let mut bounds = Vec::with_capacity(row.cells.len());
    let mut x = row.indent;
    for cell in &row.cells {
        let w = cell.width();
        bounds.push((x, w));
        x += w + GAP;
    }
    bounds
}

/// All focusable fields in traversal (reading) order.
pub fn focusable_fields(rows: &[FormRow]) -> Vec<FieldId> {
    rows.iter()
        .flat_map(|row| row.cells.iter().filter_map(|cell| cell.field))
        .collect()
}

/// Row index holding `field`, if it is still on the form.
pub fn row_of(rows: &[FormRow], field: FieldId) -> Option<usize> {
    rows.iter()
        .position(|row| row.cells.iter().any(|cell| cell.field == Some(field)))
}

/// Resolve a mouse position to the field under it, if any.
pub fn hit_test(
    rows: &[FormRow],
    inner: Rect,
    offset: usize,
    column: u16,
    row_y: u16,
) -> Option<FieldId> {
    if column < inner.x
        || column >= inner.x + inner.width
        || row_y < inner.y
        || row_y >= inner.y + inner.height
    {
        return None;
    }
    let row = rows.get(offset + (row_y - inner.y) as usize)?;
    for (cell, (x, w)) in row.cells.iter().zip(cell_bounds(row)) {
        let start = inner.x + x;
        if column >= start && column < start + w {
            return cell.field;
        }
    }
    None
}

// ───────────────────────────────────────── widget state ──────

/// Persistent form state (focused field, scroll offset, text cursor).
#[derive(Debug, Default)]
pub struct FormState {
    /// The cell that receives keyboard input, if any.
    pub focused: Option<FieldId>,
    /// Vertical scroll offset (first visible row).
    pub offset: usize,
    /// Byte position of the text cursor within the focused field.
    pub cursor: usize,
}

impl FormState {
    /// Ensure the focused row is visible within a viewport of `height` rows.
    pub fn clamp_scroll(&mut self, selected_row: usize, height: usize) {
        if height == 0 {
            return;
        }
        if selected_row < self.offset {
            self.offset = selected_row;
        } else if selected_row >= self.offset + height {
            self.offset = selected_row - height + 1;
        }
    }
}

// ───────────────────────────────────────── widget ────────────

/// The form widget itself — created fresh each frame.
pub struct FormWidget<'a> {
    splitter: &'a Splitter,
    theme: Theme,
    copied: bool,
    block: Option<Block<'a>>,
}

impl<'a> FormWidget<'a> {
    pub fn new(splitter: &'a Splitter, theme: Theme, copied: bool) -> Self {
        Self { splitter, theme, copied, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn cell_spans(&self, cell: &Cell, focused: bool, cursor: usize) -> Vec<Span<'static>> {
        let theme = &self.theme;
        match cell.kind {
            CellKind::Section => vec![Span::styled(cell.text.clone(), theme.section_style())],
            CellKind::Strong => vec![Span::styled(cell.text.clone(), theme.strong_style())],
            CellKind::Label => {
                let style = match cell.color {
                    Some(color) => theme.label_style().fg(Theme::participant(color)),
                    None => theme.label_style(),
                };
                vec![Span::styled(cell.text.clone(), style)]
            }
            CellKind::Text { width, placeholder } => {
                text_field_spans(&cell.text, width, placeholder, focused, cursor, theme)
            }
            CellKind::Checkbox { checked } => {
                let mark = if checked { "[x] " } else { "[ ] " };
                let mark_style = if focused {
                    theme.button_focused_style()
                } else {
                    theme.label_style()
                };
                let label_style = if focused {
                    theme.button_focused_style()
                } else if checked {
                    match cell.color {
                        Some(color) => theme.label_style().fg(Theme::participant(color)),
                        None => theme.label_style(),
                    }
                } else {
                    theme.hint_style()
                };
                vec![
                    Span::styled(mark.to_string(), mark_style),
                    Span::styled(cell.text.clone(), label_style),
                ]
            }
            CellKind::Button => {
                let style = if focused {
                    theme.button_focused_style()
                } else if cell.text == "Copied!" {
                    theme.copied_style()
                } else {
                    theme.button_style()
                };
                vec![Span::styled(format!("[ {} ]", cell.text), style)]
            }
        }
    }
}

impl<'a> StatefulWidget for FormWidget<'a> {
    type State = FormState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let rows = build_rows(self.splitter, self.copied);
        let selected_row = state
            .focused
            .and_then(|field| row_of(&rows, field))
            .unwrap_or(0);
        state.clamp_scroll(selected_row, inner.height as usize);

        let visible = rows.iter().skip(state.offset).take(inner.height as usize);
        for (i, row) in visible.enumerate() {
            let y = inner.y + i as u16;
            for (cell, (x, w)) in row.cells.iter().zip(cell_bounds(row)) {
                if x >= inner.width {
                    break;
                }
                let focused = cell.field.is_some() && cell.field == state.focused;
                let spans = self.cell_spans(cell, focused, state.cursor);
                let line = Line::from(spans);
                buf.set_line(inner.x + x, y, &line, w.min(inner.width - x));
            }
        }
    }
}

/// Render an editable text cell at exactly `width` columns: content window,
/// cursor highlight when focused, placeholder while empty.
fn text_field_spans(
    text: &str,
    width: u16,
    placeholder: &'static str,
    focused: bool,
    cursor: usize,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let budget = width as usize;
    let style = if focused { theme.field_focused_style() } else { theme.field_style() };

    if !focused {
        if text.is_empty() {
            let (shown, used) = clip_to_width(placeholder, budget);
            return vec![
                Span::styled(shown, theme.placeholder_style()),
                Span::styled(" ".repeat(budget - used), theme.field_style()),
            ];
        }
        let (shown, used) = clip_to_width(text, budget);
        return vec![
            Span::styled(shown, style),
            Span::styled(" ".repeat(budget - used), style),
        ];
    }

    // Focused: keep the cursor inside the window (one column is reserved
    // for the cursor itself when it sits past the end of the text).
    let chars: Vec<char> = text.chars().collect();
    let cursor_idx = text[..cursor.min(text.len())].chars().count();
    let start = (cursor_idx + 1).saturating_sub(budget);

    let mut spans = Vec::new();
    let mut used = 0usize;

    let mut pre = String::new();
    for &c in &chars[start..cursor_idx] {
        let cw = c.width().unwrap_or(1);
        if used + cw > budget {
            break;
        }
        pre.push(c);
        used += cw;
    }
    if !pre.is_empty() {
        spans.push(Span::styled(pre, style));
    }

    let cursor_char = chars.get(cursor_idx).copied().unwrap_or(' ');
    let cw = cursor_char.width().unwrap_or(1);
    if used + cw <= budget {
        spans.push(Span::styled(cursor_char.to_string(), theme.cursor_style()));
        used += cw;
    }

    let mut post = String::new();
    for &c in chars.iter().skip(cursor_idx + 1) {
        let cw = c.width().unwrap_or(1);
        if used + cw > budget {
            break;
        }
        post.push(c);
        used += cw;
    }
    if !post.is_empty() {
        spans.push(Span::styled(post, style));
    }

    if used < budget {
        spans.push(Span::styled(" ".repeat(budget - used), style));
    }
    spans
}

/// Take leading characters until the width budget is spent.
fn clip_to_width(text: &str, budget: usize) -> (String, usize) {
    let mut out = String::new();
    let mut used = 0usize;
    for c in text.chars() {
        let cw = c.width().unwrap_or(1);
        if used + cw > budget {
            break;
        }
        out.push(c);
        used += cw;
    }
    (out, used)
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_item_has_no_remove_button() {
        let splitter = Splitter::seed();
        let rows = build_rows(&splitter, false);
        let fields = focusable_fields(&rows);
        assert!(!fields.iter().any(|f| matches!(f, FieldId::RemoveItem(_))));

        let mut splitter = splitter;
        splitter.add_item();
        let fields = focusable_fields(&build_rows(&splitter, false));
        assert_eq!(
            fields
                .iter()
                .filter(|f| matches!(f, FieldId::RemoveItem(_)))
                .count(),
            2
        );
    }

    #[test]
    fn common_items_hide_presets_and_assignment_boxes() {
        let mut splitter = Splitter::seed();
        let fields = focusable_fields(&build_rows(&splitter, false));
        assert!(!fields.iter().any(|f| matches!(f, FieldId::QuickSplit(..))));
        assert!(!fields.iter().any(|f| matches!(f, FieldId::Assign(..))));

        splitter.set_common(0, false);
        let fields = focusable_fields(&build_rows(&splitter, false));
        assert_eq!(
            fields
                .iter()
                .filter(|f| matches!(f, FieldId::QuickSplit(..)))
                .count(),
            QUICK_SPLITS.len()
        );
        assert_eq!(
            fields.iter().filter(|f| matches!(f, FieldId::Assign(..))).count(),
            splitter.roster.len()
        );
    }

    #[test]
    fn traversal_starts_at_the_roster_and_ends_at_reset() {
        let splitter = Splitter::seed();
        let fields = focusable_fields(&build_rows(&splitter, false));
        assert_eq!(fields.first(), Some(&FieldId::AddParticipant));
        assert_eq!(fields.last(), Some(&FieldId::Reset));
        assert!(fields.contains(&FieldId::RosterName(0)));
        assert!(fields.contains(&FieldId::CopySummary));
    }

    #[test]
    fn hit_test_resolves_cells_and_gaps() {
        let splitter = Splitter::seed();
        let rows = build_rows(&splitter, false);
        let inner = Rect::new(1, 1, 80, 30);

        // Row 0: "Roommates" section then the add button.
        let bounds = cell_bounds(&rows[0]);
        let (button_x, _) = bounds[1];
        assert_eq!(
            hit_test(&rows, inner, 0, inner.x + button_x + 1, inner.y),
            Some(FieldId::AddParticipant)
        );
        // The section label itself is not focusable.
        assert_eq!(hit_test(&rows, inner, 0, inner.x + 1, inner.y), None);
        // Outside the pane entirely.
        assert_eq!(hit_test(&rows, inner, 0, 0, 0), None);
    }

    #[test]
    fn scroll_clamps_to_keep_selection_visible() {
        let mut state = FormState::default();
        state.clamp_scroll(12, 10);
        assert_eq!(state.offset, 3);
        state.clamp_scroll(2, 10);
        assert_eq!(state.offset, 2);
    }
}
