//! Plain-text summary export — the only surface handed to the clipboard.

use super::engine::Splitter;

/// Currency prefix used everywhere an amount is shown.
pub const CURRENCY: &str = "₹";

/// First line of the exported summary.
pub const SUMMARY_HEADER: &str = "Roomie Bill Splitter";

/// Fixed-format monetary rendering: currency prefix, two decimals.
pub fn format_amount(value: f64) -> String {
    format!("{CURRENCY}{value:.2}")
}

/// Build the shareable multi-line summary.
///
/// Header, total, one line per participant, then an `Items:` section.
/// Items with neither a name nor a price are skipped entirely; otherwise a
/// missing name renders as `(no name)` and a missing price as `0`.
/// Assignment entries that no longer resolve to a participant are dropped.
pub fn summary_text(splitter: &Splitter) -> String {
    let owed = splitter.owed_amounts();
    let total: f64 = owed.iter().sum();

    let mut text = format!("{SUMMARY_HEADER}\n\nTotal: {}\n", format_amount(total));
    for (idx, amount) in owed.iter().enumerate() {
        if let Some(p) = splitter.roster.get(idx) {
            text.push_str(&format!("\n{}: {}", p.name, format_amount(*amount)));
        }
    }

    text.push_str("\n\nItems:");
    for item in splitter.bill.items() {
        if item.is_blank() {
            continue;
        }
        let assigned_names = item
            .assigned
            .iter()
            .filter_map(|&idx| splitter.roster.get(idx))
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let name = if item.name.is_empty() { "(no name)" } else { &item.name };
        let price = if item.price.is_empty() { "0" } else { &item.price };
        text.push_str(&format!("\n{name} - {CURRENCY}{price} [{assigned_names}]"));
    }
    text
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_is_prefix_plus_two_decimals() {
        assert_eq!(format_amount(0.0), "₹0.00");
        assert_eq!(format_amount(50.0), "₹50.00");
        assert_eq!(format_amount(33.335), "₹33.34");
    }

    #[test]
    fn blank_item_list_still_prints_header_total_and_participants() {
        let splitter = Splitter::seed();
        let text = summary_text(&splitter);
        assert_eq!(
            text,
            "Roomie Bill Splitter\n\nTotal: ₹0.00\n\
             \nYou: ₹0.00\nRoommate 1: ₹0.00\nRoommate 2: ₹0.00\n\nItems:"
        );
    }

    #[test]
    fn items_render_with_fallback_name_and_price() {
        let mut splitter = Splitter::seed();
        splitter.bill.set_price(0, "90");

        splitter.add_item();
        splitter.bill.set_name(1, "wifi");
        splitter.set_common(1, false);
        splitter.toggle_assignment(1, 1);

        let text = summary_text(&splitter);
        assert!(text.contains("\n(no name) - ₹90 [You, Roommate 1, Roommate 2]"));
        assert!(text.contains("\nwifi - ₹0 [Roommate 1]"));
    }

    #[test]
    fn price_text_is_exported_verbatim() {
        let mut splitter = Splitter::seed();
        splitter.bill.set_price(0, "12.5 beers");
        let text = summary_text(&splitter);
        // The raw field text is shared, while the total uses the parsed value.
        assert!(text.contains("- ₹12.5 beers ["));
        assert!(text.contains("Total: ₹12.50"));
    }

    #[test]
    fn owed_lines_follow_roster_order_and_splits() {
        let mut splitter = Splitter::seed();
        splitter.bill.set_name(0, "pizza");
        splitter.bill.set_price(0, "100");
        splitter.set_common(0, false);
        splitter.toggle_assignment(0, 0);
        splitter.toggle_assignment(0, 1);

        let text = summary_text(&splitter);
        assert!(text.contains("Total: ₹100.00"));
        assert!(text.contains("\nYou: ₹50.00"));
        assert!(text.contains("\nRoommate 1: ₹50.00"));
        assert!(text.contains("\nRoommate 2: ₹0.00"));
    }
}
