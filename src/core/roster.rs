//! The roster — the ordered list of participants sharing the bill.
//!
//! Participants are addressed by their position in the list.  The roster
//! only ever grows or is reset wholesale, so positions are stable for the
//! lifetime of a session segment; nothing here hands out dangling indices.

/// Names used for the seed roster.  Positions past the end of this list get
/// an auto-generated `"Roommate {n}"` label.
pub const DEFAULT_NAMES: &[&str] = &["You", "Roommate 1", "Roommate 2"];

/// Display colors assigned to participants by position, cycling when the
/// roster outgrows the palette.
pub const PALETTE: &[(u8, u8, u8)] = &[
    (0x3b, 0x82, 0xf6), // blue
    (0x10, 0xb9, 0x81), // green
    (0xf5, 0x9e, 0x0b), // amber
    (0xef, 0x44, 0x44), // red
    (0x8b, 0x5c, 0xf6), // purple
    (0xec, 0x48, 0x99), // pink
    (0x06, 0xb6, 0xd4), // cyan
    (0xf9, 0x73, 0x16), // orange
];

/// Maximum participant name length, enforced at input time.
pub const MAX_NAME_LEN: usize = 20;

/// The auto-generated label for a roster position.  Stable for the position
/// regardless of the current name.
pub fn default_label(index: usize) -> String {
    DEFAULT_NAMES
        .get(index)
        .map(|n| n.to_string())
        .unwrap_or_else(|| format!("Roommate {}", index + 1))
}

/// Palette color for a roster position.
pub fn palette_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

// ───────────────────────────────────────── participant ───────

/// One person sharing the bill.
#[derive(Debug, Clone)]
pub struct Participant {
    pub name: String,
    /// Display tag, fixed at creation time.
    pub color: (u8, u8, u8),
}

// ───────────────────────────────────────── roster ────────────

/// Ordered participant list.
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// The fixed session seed: three default roommates.
    pub fn seed() -> Self {
        let participants = DEFAULT_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| Participant {
                name: name.to_string(),
                color: palette_color(i),
            })
            .collect();
        Self { participants }
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Append a participant with the next auto-generated name and the next
    /// palette color.  Returns the new participant's index.
    pub fn add(&mut self) -> usize {
        let index = self.participants.len();
        self.participants.push(Participant {
            name: format!("Roommate {}", index + 1),
            color: palette_color(index),
        });
        index
    }

    /// Set a participant's name verbatim.  Length limits are an input-time
    /// concern, not enforced here.
    pub fn rename(&mut self, index: usize, name: &str) {
        if let Some(p) = self.participants.get_mut(index) {
            p.name = name.to_string();
        }
    }

    /// Focus-in rule: a name still equal to its positional default is
    /// cleared so the user can type fresh.
    pub fn begin_name_edit(&mut self, index: usize) {
        if let Some(p) = self.participants.get_mut(index) {
            if p.name == default_label(index) {
                p.name.clear();
            }
        }
    }

    /// Blur rule: an empty or whitespace-only name reverts to the
    /// positional default label — never left blank.
    pub fn end_name_edit(&mut self, index: usize) {
        if let Some(p) = self.participants.get_mut(index) {
            if p.name.trim().is_empty() {
                p.name = default_label(index);
            }
        }
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_three_defaults_with_positional_colors() {
        let roster = Roster::seed();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.get(0).unwrap().name, "You");
        assert_eq!(roster.get(1).unwrap().name, "Roommate 1");
        assert_eq!(roster.get(2).unwrap().name, "Roommate 2");
        for i in 0..3 {
            assert_eq!(roster.get(i).unwrap().color, PALETTE[i]);
        }
    }

    #[test]
    fn add_names_by_new_length_and_cycles_palette() {
        let mut roster = Roster::seed();
        let idx = roster.add();
        assert_eq!(idx, 3);
        assert_eq!(roster.get(3).unwrap().name, "Roommate 4");

        // Grow past the palette; colors wrap around.
        for _ in 0..7 {
            roster.add();
        }
        assert_eq!(roster.len(), 11);
        assert_eq!(roster.get(8).unwrap().color, PALETTE[0]);
        assert_eq!(roster.get(10).unwrap().color, PALETTE[2]);
    }

    #[test]
    fn begin_edit_clears_only_default_names() {
        let mut roster = Roster::seed();
        roster.begin_name_edit(0);
        assert_eq!(roster.get(0).unwrap().name, "");

        roster.rename(1, "Sam");
        roster.begin_name_edit(1);
        assert_eq!(roster.get(1).unwrap().name, "Sam");
    }

    #[test]
    fn end_edit_restores_positional_default_for_blank_names() {
        let mut roster = Roster::seed();
        roster.rename(2, "   ");
        roster.end_name_edit(2);
        assert_eq!(roster.get(2).unwrap().name, "Roommate 2");

        // The default is keyed by position, not by what was there before.
        roster.add();
        roster.rename(3, "");
        roster.end_name_edit(3);
        assert_eq!(roster.get(3).unwrap().name, "Roommate 4");
    }

    #[test]
    fn rename_is_verbatim() {
        let mut roster = Roster::seed();
        roster.rename(0, "  Alex  ");
        assert_eq!(roster.get(0).unwrap().name, "  Alex  ");
    }
}
