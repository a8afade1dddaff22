use ratatui::layout::Rect;

/// Open slash-command dropdown. `None` in the app state is the Closed state.
#[derive(Debug, Clone, PartialEq)]
pub struct SlashMenuState {
    /// Fragment typed after the slash, without the slash itself.
    pub query: String,
    /// Byte index of the `/` in the composer text.
    pub slash_byte: usize,
    /// Indices into the command table, in table order. Never empty while
    /// the menu is open.
    pub matches: Vec<usize>,
    /// Position within `matches`. Exactly one entry is selected at all
    /// times; arrow movement clamps at the ends.
    pub selected_index: usize,
    /// Placed dropdown rectangle, kept for hit-testing.
    pub rect: Rect,
}

impl SlashMenuState {
    pub fn select_next(&mut self) {
        self.selected_index = (self.selected_index + 1).min(self.matches.len().saturating_sub(1));
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Table index of the highlighted entry.
    #[must_use]
    pub fn selected_entry(&self) -> Option<usize> {
        self.matches.get(self.selected_index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(matches: Vec<usize>) -> SlashMenuState {
        SlashMenuState {
            query: "tra".to_string(),
            slash_byte: 0,
            matches,
            selected_index: 0,
            rect: Rect::default(),
        }
    }

    #[test]
    fn arrows_clamp_without_wraparound() {
        let mut m = menu(vec![0, 1, 2]);
        m.select_prev();
        assert_eq!(m.selected_index, 0);
        m.select_next();
        m.select_next();
        m.select_next();
        assert_eq!(m.selected_index, 2);
        m.select_next();
        assert_eq!(m.selected_index, 2);
    }

    #[test]
    fn selected_entry_follows_matches() {
        let mut m = menu(vec![4, 7]);
        assert_eq!(m.selected_entry(), Some(4));
        m.select_next();
        assert_eq!(m.selected_entry(), Some(7));
    }
}
