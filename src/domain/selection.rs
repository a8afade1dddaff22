use ratatui::layout::Rect;

/// Capability classification of a screen region, derived once per hit-test
/// query and carried on snapshots instead of being re-derived at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionRole {
    /// Text-entry surface (the composer). Selections here are never eligible.
    Editable,
    /// Response content (the transcript pane).
    Readonly,
    /// Header, footer, borders, overlays.
    Chrome,
}

/// Immutable capture of the live selection at the moment a qualifying event
/// fired. Superseded wholesale by the next capture, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot {
    /// Trimmed text of the selection.
    pub text: String,
    /// Viewport-clipped bounding box of the selected lines. Zero-area when
    /// the selection is collapsed or scrolled out of view.
    pub rect: Rect,
    pub origin: RegionRole,
}

impl SelectionSnapshot {
    #[must_use]
    pub fn new(text: impl Into<String>, rect: Rect, origin: RegionRole) -> Self {
        Self {
            text: text.into().trim().to_string(),
            rect,
            origin,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Chebyshev distance in cells from a point to a rect (0 when inside).
/// Used for the "pointer-down far from the overlay" dismissal rule.
#[must_use]
pub fn distance_to_rect(x: u16, y: u16, rect: Rect) -> u16 {
    let dx = if x < rect.x {
        rect.x - x
    } else if x >= rect.x + rect.width {
        x - (rect.x + rect.width).saturating_sub(1)
    } else {
        0
    };
    let dy = if y < rect.y {
        rect.y - y
    } else if y >= rect.y + rect.height {
        y - (rect.y + rect.height).saturating_sub(1)
    } else {
        0
    };
    dx.max(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_trims_text() {
        let s = SelectionSnapshot::new("  hello  ", Rect::new(0, 0, 5, 1), RegionRole::Readonly);
        assert_eq!(s.text, "hello");
        assert!(!s.is_empty());
    }

    #[test]
    fn distance_inside_is_zero() {
        let r = Rect::new(5, 5, 10, 2);
        assert_eq!(distance_to_rect(5, 5, r), 0);
        assert_eq!(distance_to_rect(14, 6, r), 0);
    }

    #[test]
    fn distance_outside_is_chebyshev() {
        let r = Rect::new(5, 5, 10, 2);
        assert_eq!(distance_to_rect(2, 5, r), 3);
        assert_eq!(distance_to_rect(5, 1, r), 4);
        assert_eq!(distance_to_rect(2, 1, r), 4);
        assert_eq!(distance_to_rect(20, 8, r), 6);
    }
}
