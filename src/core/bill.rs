//! Billed items and the operations that edit them.
//!
//! An item's price is kept as the text the user typed; it is only parsed
//! when amounts are computed.  Assignment sets hold participant positions
//! and are pruned whenever the roster shrinks.

use std::collections::BTreeSet;

/// Maximum item name length, enforced at input time.
pub const MAX_ITEM_NAME_LEN: usize = 30;

// ───────────────────────────────────────── quick splits ──────

/// A preset split.  The weights are what the user sees on the button; only
/// the *count* of weights participates in the computation — the first
/// `len(weights)` roster positions get assigned, each with an equal share.
#[derive(Debug, Clone, Copy)]
pub struct QuickSplit {
    pub label: &'static str,
    pub weights: &'static [f64],
}

pub const QUICK_SPLITS: &[QuickSplit] = &[
    QuickSplit { label: "50/50", weights: &[0.5, 0.5] },
    QuickSplit { label: "70/30", weights: &[0.7, 0.3] },
    QuickSplit { label: "60/40", weights: &[0.6, 0.4] },
    QuickSplit { label: "33/33/33", weights: &[0.33, 0.33, 0.34] },
];

// ───────────────────────────────────────── price text ────────

/// Parse the longest leading numeric prefix of `text`, `parseFloat`-style:
/// optional sign, digits, decimal point, optional exponent.  Anything after
/// the prefix is ignored, so `"12.5 beers"` prices at 12.5.  No prefix at
/// all parses as 0.
pub fn parse_price(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;

    if matches!(bytes.first(), Some(&b'+') | Some(&b'-')) {
        end += 1;
    }
    while bytes.get(end).is_some_and(|b| b.is_ascii_digit()) {
        end += 1;
        seen_digit = true;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(|b| b.is_ascii_digit()) {
            end += 1;
            seen_digit = true;
        }
    }
    if !seen_digit {
        return 0.0;
    }

    // Exponent only counts if at least one digit follows it.
    if matches!(bytes.get(end), Some(&b'e') | Some(&b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(&b'+') | Some(&b'-')) {
            exp_end += 1;
        }
        let mut exp_digits = false;
        while bytes.get(exp_end).is_some_and(|b| b.is_ascii_digit()) {
            exp_end += 1;
            exp_digits = true;
        }
        if exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

// ───────────────────────────────────────── item ──────────────

/// Stable item identity, handed out monotonically.  Positions shift when an
/// item is removed; ids never do, so the UI tracks focus by id.
pub type ItemId = u64;

/// A single billed item.
#[derive(Debug, Clone)]
pub struct BillItem {
    pub id: ItemId,
    /// Free-text item name, stored verbatim.
    pub name: String,
    /// Price as typed; parsed lazily by [`BillItem::parsed_price`].
    pub price: String,
    /// Roster positions responsible for this item's cost.
    pub assigned: BTreeSet<usize>,
    /// Whether the item is split across the entire roster.  Re-derived from
    /// `assigned` after membership toggles; may disagree transiently while
    /// the user is mid-edit (quick splits force it off).
    pub is_common: bool,
}

impl BillItem {
    /// The numeric value this item contributes, per [`parse_price`].
    pub fn parsed_price(&self) -> f64 {
        parse_price(&self.price)
    }

    /// Items with neither a name nor a price are skipped by the exporter.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.price.is_empty()
    }
}

// ───────────────────────────────────────── bill ──────────────

/// The ordered item list.
#[derive(Debug, Clone)]
pub struct Bill {
    items: Vec<BillItem>,
    next_id: ItemId,
}

impl Bill {
    /// The fixed session seed: one blank item split across everyone.
    pub fn seed(roster_len: usize) -> Self {
        let mut bill = Self { items: Vec::new(), next_id: 0 };
        bill.add_item(roster_len);
        bill
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[BillItem] {
        &self.items
    }

    pub fn get(&self, pos: usize) -> Option<&BillItem> {
        self.items.get(pos)
    }

    /// Current position of an item id, if it still exists.
    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Append a blank item assigned to the whole roster.
    pub fn add_item(&mut self, roster_len: usize) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(BillItem {
            id,
            name: String::new(),
            price: String::new(),
            assigned: (0..roster_len).collect(),
            is_common: true,
        });
        id
    }

    /// Delete the item at `pos`.  Refused when it is the last one — the
    /// list never becomes empty.  Returns whether anything was removed.
    pub fn remove_item(&mut self, pos: usize) -> bool {
        if self.items.len() <= 1 || pos >= self.items.len() {
            return false;
        }
        self.items.remove(pos);
        true
    }

    /// Store name text verbatim.
    pub fn set_name(&mut self, pos: usize, name: &str) {
        if let Some(item) = self.items.get_mut(pos) {
            item.name = name.to_string();
        }
    }

    /// Store price text verbatim; validation happens at computation time.
    pub fn set_price(&mut self, pos: usize, price: &str) {
        if let Some(item) = self.items.get_mut(pos) {
            item.price = price.to_string();
        }
    }

    /// Flip a participant's membership in the item's assigned set, then
    /// re-derive `is_common` from the assigned count.  Hand-picking every
    /// participant marks the item common again.
    pub fn toggle_assignment(&mut self, pos: usize, participant: usize, roster_len: usize) {
        if let Some(item) = self.items.get_mut(pos) {
            if !item.assigned.remove(&participant) {
                item.assigned.insert(participant);
            }
            item.is_common = item.assigned.len() == roster_len;
        }
    }

    /// Blunt reset: checked assigns the whole roster, unchecked clears the
    /// set entirely.
    pub fn set_common(&mut self, pos: usize, checked: bool, roster_len: usize) {
        if let Some(item) = self.items.get_mut(pos) {
            item.assigned = if checked { (0..roster_len).collect() } else { BTreeSet::new() };
            item.is_common = checked;
        }
    }

    /// Apply a preset split: assign the first `min(weights, roster)` roster
    /// positions and mark the item non-common.  The fractional weights are
    /// display-only; shares stay equal among the assigned.  No-op with
    /// fewer than two participants.  Returns whether anything changed.
    pub fn apply_quick_split(&mut self, pos: usize, preset: usize, roster_len: usize) -> bool {
        if roster_len < 2 {
            return false;
        }
        let Some(split) = QUICK_SPLITS.get(preset) else {
            return false;
        };
        let Some(item) = self.items.get_mut(pos) else {
            return false;
        };
        let take = split.weights.len().min(roster_len);
        item.assigned = (0..take).collect();
        item.is_common = false;
        true
    }

    /// Drop assignment entries that no longer name a valid roster position.
    pub fn prune_assignments(&mut self, roster_len: usize) {
        for item in &mut self.items {
            item.assigned.retain(|&idx| idx < roster_len);
        }
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn assigned(bill: &Bill, pos: usize) -> Vec<usize> {
        bill.get(pos).unwrap().assigned.iter().copied().collect()
    }

    #[test]
    fn parse_price_handles_numeric_prefixes() {
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("abc"), 0.0);
        assert_eq!(parse_price("42"), 42.0);
        assert_eq!(parse_price(" 12.5"), 12.5);
        assert_eq!(parse_price("12.5 beers"), 12.5);
        assert_eq!(parse_price(".5"), 0.5);
        assert_eq!(parse_price("12."), 12.0);
        assert_eq!(parse_price("-5"), -5.0);
        assert_eq!(parse_price("1e2"), 100.0);
        assert_eq!(parse_price("1e"), 1.0);
        assert_eq!(parse_price("+."), 0.0);
    }

    #[test]
    fn seed_is_one_blank_common_item() {
        let bill = Bill::seed(3);
        assert_eq!(bill.len(), 1);
        let item = bill.get(0).unwrap();
        assert!(item.is_blank());
        assert!(item.is_common);
        assert_eq!(assigned(&bill, 0), vec![0, 1, 2]);
    }

    #[test]
    fn last_item_cannot_be_removed() {
        let mut bill = Bill::seed(3);
        assert!(!bill.remove_item(0));
        assert_eq!(bill.len(), 1);

        bill.add_item(3);
        assert!(bill.remove_item(0));
        assert_eq!(bill.len(), 1);
    }

    #[test]
    fn toggle_assignment_round_trips() {
        let mut bill = Bill::seed(3);
        let before = bill.get(0).unwrap().clone();

        bill.toggle_assignment(0, 1, 3);
        assert_eq!(assigned(&bill, 0), vec![0, 2]);
        assert!(!bill.get(0).unwrap().is_common);

        bill.toggle_assignment(0, 1, 3);
        assert_eq!(bill.get(0).unwrap().assigned, before.assigned);
        assert_eq!(bill.get(0).unwrap().is_common, before.is_common);
    }

    #[test]
    fn hand_picking_everyone_marks_common_again() {
        let mut bill = Bill::seed(2);
        bill.set_common(0, false, 2);
        bill.toggle_assignment(0, 0, 2);
        assert!(!bill.get(0).unwrap().is_common);
        bill.toggle_assignment(0, 1, 2);
        assert!(bill.get(0).unwrap().is_common);
    }

    #[test]
    fn set_common_is_a_blunt_reset() {
        let mut bill = Bill::seed(4);
        bill.set_common(0, false, 4);
        assert!(assigned(&bill, 0).is_empty());
        assert!(!bill.get(0).unwrap().is_common);

        bill.toggle_assignment(0, 2, 4);
        bill.set_common(0, true, 4);
        assert_eq!(assigned(&bill, 0), vec![0, 1, 2, 3]);
        assert!(bill.get(0).unwrap().is_common);
    }

    #[test]
    fn quick_split_assigns_first_n_and_ignores_weights() {
        // The 0.5/0.5 weights do not weight anything: the preset only
        // determines how many leading positions get assigned.
        let mut bill = Bill::seed(4);
        assert!(bill.apply_quick_split(0, 0, 4));
        assert_eq!(assigned(&bill, 0), vec![0, 1]);
        assert!(!bill.get(0).unwrap().is_common);
    }

    #[test]
    fn quick_split_truncates_to_roster_size() {
        let mut bill = Bill::seed(2);
        // 33/33/33 has three weights but only two roommates exist.
        assert!(bill.apply_quick_split(0, 3, 2));
        assert_eq!(assigned(&bill, 0), vec![0, 1]);
        // Covering the whole roster via a preset still leaves the item
        // non-common; only toggling or the checkbox re-derives it.
        assert!(!bill.get(0).unwrap().is_common);
    }

    #[test]
    fn quick_split_refused_below_two_participants() {
        let mut bill = Bill::seed(1);
        assert!(!bill.apply_quick_split(0, 0, 1));
        assert_eq!(assigned(&bill, 0), vec![0]);
        assert!(bill.get(0).unwrap().is_common);
    }

    #[test]
    fn prune_drops_stale_positions() {
        let mut bill = Bill::seed(5);
        bill.prune_assignments(2);
        assert_eq!(assigned(&bill, 0), vec![0, 1]);
    }
}
