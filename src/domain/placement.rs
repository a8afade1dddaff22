use ratatui::layout::{Position, Rect};

/// Cells kept clear between an overlay and the frame edge.
pub const VIEWPORT_INSET: u16 = 1;

/// Dropdown widths are clamped to this band instead of being derived from
/// content, so previews of different lengths cannot make the menu jitter.
pub const DROPDOWN_MIN_WIDTH: u16 = 24;
pub const DROPDOWN_MAX_WIDTH: u16 = 44;

/// What an overlay is positioned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAnchor {
    /// Bounding box of a selection in the transcript pane.
    Selection(Rect),
    /// A measured caret cell inside the composer.
    Caret(Position),
    /// Deterministic fallback: the target region's own box, used when no
    /// usable anchor geometry exists.
    Region(Rect),
}

/// Compute the overlay rect for `anchor`, preferring placement above it and
/// flipping below when the top would clip, then clamping into `frame` with
/// [`VIEWPORT_INSET`]. Pure and idempotent.
#[must_use]
pub fn place(anchor: OverlayAnchor, size: (u16, u16), frame: Rect) -> Rect {
    let (width, height) = size;
    let (x, top_above, top_below) = match anchor {
        OverlayAnchor::Selection(rect) => (
            rect.x,
            rect.y.saturating_sub(height),
            rect.y.saturating_add(rect.height),
        ),
        OverlayAnchor::Caret(pos) => (
            pos.x,
            pos.y.saturating_sub(height),
            pos.y.saturating_add(1),
        ),
        OverlayAnchor::Region(rect) => (rect.x, rect.y, rect.y),
    };

    // Above by default; below when the top edge would leave the inset band.
    let y = if top_above >= frame.y.saturating_add(VIEWPORT_INSET) {
        top_above
    } else {
        top_below
    };

    clamp_to(Rect::new(x, y, width, height), frame)
}

/// Clamp `rect` so every edge stays inside `frame` minus the inset margin.
/// Frames too small for the inset band degrade to clamping against the frame
/// itself; rects wider or taller than the available space are shrunk.
#[must_use]
pub fn clamp_to(rect: Rect, frame: Rect) -> Rect {
    let inset = inset_band(frame);
    let width = rect.width.min(inset.width);
    let height = rect.height.min(inset.height);
    let max_x = inset.x + inset.width - width;
    let max_y = inset.y + inset.height - height;
    Rect::new(
        rect.x.clamp(inset.x, max_x),
        rect.y.clamp(inset.y, max_y),
        width,
        height,
    )
}

fn inset_band(frame: Rect) -> Rect {
    if frame.width > 2 * VIEWPORT_INSET && frame.height > 2 * VIEWPORT_INSET {
        Rect::new(
            frame.x + VIEWPORT_INSET,
            frame.y + VIEWPORT_INSET,
            frame.width - 2 * VIEWPORT_INSET,
            frame.height - 2 * VIEWPORT_INSET,
        )
    } else {
        frame
    }
}

/// Width for dropdown-style overlays: fixed band, narrowed only by the frame.
#[must_use]
pub fn dropdown_width(frame: Rect) -> u16 {
    let available = frame.width.saturating_sub(2 * VIEWPORT_INSET);
    DROPDOWN_MAX_WIDTH.min(available).max(DROPDOWN_MIN_WIDTH.min(available))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn selection_anchor_prefers_above() {
        let anchor = OverlayAnchor::Selection(Rect::new(10, 10, 20, 2));
        let placed = place(anchor, (14, 1), FRAME);
        assert_eq!(placed, Rect::new(10, 9, 14, 1));
    }

    #[test]
    fn flips_below_when_top_would_clip() {
        let anchor = OverlayAnchor::Selection(Rect::new(10, 0, 20, 1));
        let placed = place(anchor, (14, 1), FRAME);
        assert_eq!(placed.y, 1);
    }

    #[test]
    fn caret_anchor_above_and_flip() {
        let above = place(OverlayAnchor::Caret(Position::new(5, 12)), (24, 6), FRAME);
        assert_eq!(above.y, 6);
        let flipped = place(OverlayAnchor::Caret(Position::new(5, 3)), (24, 6), FRAME);
        assert_eq!(flipped.y, 4);
    }

    #[test]
    fn region_fallback_is_deterministic() {
        let region = Rect::new(2, 5, 40, 10);
        let a = place(OverlayAnchor::Region(region), (14, 1), FRAME);
        let b = place(OverlayAnchor::Region(region), (14, 1), FRAME);
        assert_eq!(a, b);
        assert_eq!((a.x, a.y), (2, 5));
    }

    #[test]
    fn idempotent_for_identical_inputs() {
        for x in (0..90).step_by(7) {
            for y in (0..30).step_by(3) {
                let anchor = OverlayAnchor::Selection(Rect::new(x, y, 12, 1));
                assert_eq!(place(anchor, (20, 1), FRAME), place(anchor, (20, 1), FRAME));
            }
        }
    }

    #[test]
    fn clamp_property_over_anchor_grid() {
        let frames = [
            FRAME,
            Rect::new(0, 0, 20, 6),
            Rect::new(4, 2, 60, 18),
            Rect::new(0, 0, 3, 3),
        ];
        for frame in frames {
            for x in (0..100).step_by(5) {
                for y in (0..40).step_by(4) {
                    let placed = place(
                        OverlayAnchor::Selection(Rect::new(x, y, 15, 2)),
                        (26, 5),
                        frame,
                    );
                    assert!(placed.x >= frame.x, "{placed:?} in {frame:?}");
                    assert!(placed.y >= frame.y, "{placed:?} in {frame:?}");
                    assert!(placed.x + placed.width <= frame.x + frame.width);
                    assert!(placed.y + placed.height <= frame.y + frame.height);
                }
            }
        }
    }

    #[test]
    fn oversized_overlay_shrinks_to_frame() {
        let tiny = Rect::new(0, 0, 10, 4);
        let placed = place(OverlayAnchor::Selection(Rect::new(0, 2, 5, 1)), (50, 9), tiny);
        assert!(placed.width <= tiny.width);
        assert!(placed.height <= tiny.height);
    }

    #[test]
    fn dropdown_width_band() {
        assert_eq!(dropdown_width(FRAME), DROPDOWN_MAX_WIDTH);
        assert_eq!(dropdown_width(Rect::new(0, 0, 30, 24)), 28);
        assert_eq!(dropdown_width(Rect::new(0, 0, 10, 24)), 8);
    }
}
