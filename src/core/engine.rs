//! The splitter engine — owns the roster and the bill and keeps the two
//! consistent.
//!
//! Everything observable flows through here: roster edits ripple into item
//! assignment sets, and owed amounts are derived fresh on every read rather
//! than stored.

use super::bill::{Bill, ItemId};
use super::roster::Roster;

/// Owns both lists and enforces their cross-invariants.
#[derive(Debug, Clone)]
pub struct Splitter {
    pub roster: Roster,
    pub bill: Bill,
}

impl Splitter {
    /// The fixed session seed: three roommates, one blank common item.
    pub fn seed() -> Self {
        let roster = Roster::seed();
        let bill = Bill::seed(roster.len());
        Self { roster, bill }
    }

    /// Regenerate both lists from the seed.  Colors and default names are
    /// reassigned from scratch by position.
    pub fn reset(&mut self) {
        *self = Self::seed();
    }

    // ── roster ──────────────────────────────────────────────────

    /// Append a participant and grow every common item's assignment set to
    /// cover the new roster.  Non-common items are untouched.
    pub fn add_participant(&mut self) -> usize {
        let index = self.roster.add();
        let full = self.roster.len();
        for pos in 0..self.bill.len() {
            if self.bill.get(pos).is_some_and(|item| item.is_common) {
                self.bill.set_common(pos, true, full);
            }
        }
        // The validity guard runs on every roster-length change; a growth
        // makes it a no-op.
        self.bill.prune_assignments(full);
        index
    }

    // ── bill ────────────────────────────────────────────────────

    pub fn add_item(&mut self) -> ItemId {
        self.bill.add_item(self.roster.len())
    }

    pub fn remove_item(&mut self, pos: usize) -> bool {
        self.bill.remove_item(pos)
    }

    pub fn toggle_assignment(&mut self, pos: usize, participant: usize) {
        self.bill.toggle_assignment(pos, participant, self.roster.len());
    }

    pub fn set_common(&mut self, pos: usize, checked: bool) {
        self.bill.set_common(pos, checked, self.roster.len());
    }

    pub fn apply_quick_split(&mut self, pos: usize, preset: usize) -> bool {
        self.bill.apply_quick_split(pos, preset, self.roster.len())
    }

    // ── derived ─────────────────────────────────────────────────

    /// Per-participant owed totals, in roster order.  An item's price is
    /// split equally among its assigned participants; items with an empty
    /// assignment set (or a non-positive parsed price) contribute nothing.
    pub fn owed_amounts(&self) -> Vec<f64> {
        let mut owed = vec![0.0; self.roster.len()];
        for item in self.bill.items() {
            let price = item.parsed_price();
            if price > 0.0 && !item.assigned.is_empty() {
                let share = price / item.assigned.len() as f64;
                for &idx in &item.assigned {
                    if idx < owed.len() {
                        owed[idx] += share;
                    }
                }
            }
        }
        owed
    }

    /// Grand total across all participants.
    pub fn total(&self) -> f64 {
        self.owed_amounts().iter().sum()
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter_with_items(items: &[(&str, &str, &[usize], bool)]) -> Splitter {
        let mut s = Splitter::seed();
        for (pos, &(name, price, assigned, common)) in items.iter().enumerate() {
            if pos > 0 {
                s.add_item();
            }
            s.bill.set_name(pos, name);
            s.bill.set_price(pos, price);
            s.set_common(pos, false);
            for &idx in assigned {
                s.toggle_assignment(pos, idx);
            }
            if common {
                s.set_common(pos, true);
            }
        }
        s
    }

    #[test]
    fn even_split_between_two() {
        let mut s = Splitter::seed();
        s.bill.set_price(0, "100");
        s.set_common(0, false);
        s.toggle_assignment(0, 0);
        s.toggle_assignment(0, 1);
        let owed = s.owed_amounts();
        assert!((owed[0] - 50.0).abs() < 1e-9);
        assert!((owed[1] - 50.0).abs() < 1e-9);
        assert!((s.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn single_assignee_carries_the_whole_item() {
        let s = splitter_with_items(&[("rent", "90", &[0], false)]);
        let owed = s.owed_amounts();
        assert!((owed[0] - 90.0).abs() < 1e-9);
        assert_eq!(owed[1], 0.0);
        assert_eq!(owed[2], 0.0);
    }

    #[test]
    fn owed_amounts_conserve_the_bill_total() {
        let s = splitter_with_items(&[
            ("groceries", "123.45", &[], true),
            ("wifi", "59.99", &[0, 2], false),
            ("snacks", "7.5", &[1], false),
        ]);
        let owed_sum: f64 = s.owed_amounts().iter().sum();
        assert!((owed_sum - (123.45 + 59.99 + 7.5)).abs() < 1e-9);
    }

    #[test]
    fn empty_assignment_and_bad_prices_contribute_nothing() {
        let mut s = Splitter::seed();
        s.bill.set_price(0, "60");
        s.set_common(0, false); // clears the assigned set

        s.add_item();
        s.bill.set_price(1, "not a number");

        s.add_item();
        s.bill.set_price(2, "-20");

        assert!(s.owed_amounts().iter().all(|&amt| amt == 0.0));
        assert_eq!(s.total(), 0.0);
    }

    #[test]
    fn add_participant_grows_only_common_items() {
        let mut s = Splitter::seed();
        s.add_item();
        s.set_common(1, false);
        s.toggle_assignment(1, 0);

        s.add_participant();
        assert_eq!(s.roster.len(), 4);

        let common: Vec<usize> = s.bill.get(0).unwrap().assigned.iter().copied().collect();
        assert_eq!(common, vec![0, 1, 2, 3]);
        assert!(s.bill.get(0).unwrap().is_common);

        let picked: Vec<usize> = s.bill.get(1).unwrap().assigned.iter().copied().collect();
        assert_eq!(picked, vec![0]);
        assert!(!s.bill.get(1).unwrap().is_common);
    }

    #[test]
    fn reset_shrinks_the_roster_and_reseeds_items() {
        let mut s = Splitter::seed();
        for _ in 0..4 {
            s.add_participant();
        }
        s.bill.set_price(0, "12");
        s.reset();

        assert_eq!(s.roster.len(), 3);
        assert_eq!(s.bill.len(), 1);
        assert!(s.bill.get(0).unwrap().is_blank());
        for item in s.bill.items() {
            assert!(item.assigned.iter().all(|&idx| idx < 3));
        }
    }
}
