use crate::app::state::ComposerState;
use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

/// Screen cell of the composer caret inside `inner`, mirroring how the
/// textarea scrolls to keep its cursor visible: content shifts only once
/// the caret runs past the right or bottom edge, and then by the minimum.
/// `None` when the area cannot show a caret at all.
#[must_use]
pub fn caret_screen_position(composer: &ComposerState, inner: Rect) -> Option<Position> {
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    let (row, col) = composer.text_area.cursor();
    let line = composer.text_area.lines().get(row)?;
    let col_byte = line
        .char_indices()
        .nth(col)
        .map_or(line.len(), |(i, _)| i);
    let caret_col = line[..col_byte].width() as u16;
    let caret_row = row as u16;

    let row_shift = (caret_row + 1).saturating_sub(inner.height);
    let col_shift = (caret_col + 1).saturating_sub(inner.width);

    Some(Position::new(
        inner.x + (caret_col - col_shift),
        inner.y + (caret_row - row_shift),
    ))
}
