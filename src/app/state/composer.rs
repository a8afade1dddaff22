use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use std::ops::{Deref, DerefMut};
use tui_textarea::{CursorMove, TextArea};

#[derive(Default)]
pub struct AppTextArea<'a>(pub TextArea<'a>);

impl Clone for AppTextArea<'_> {
    fn clone(&self) -> Self {
        let mut area = TextArea::new(self.0.lines().to_vec());
        let (row, col) = self.0.cursor();
        area.move_cursor(CursorMove::Jump(row as u16, col as u16));
        Self(area)
    }
}

impl std::fmt::Debug for AppTextArea<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTextArea")
            .field("lines", &self.0.lines())
            .field("cursor", &self.0.cursor())
            .finish()
    }
}

impl PartialEq for AppTextArea<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.lines() == other.0.lines() && self.0.cursor() == other.0.cursor()
    }
}

impl<'a> Deref for AppTextArea<'a> {
    type Target = TextArea<'a>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AppTextArea<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Widget for &AppTextArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self.0, area, buf);
    }
}

/// The draft input box. Unlike the transcript it is always present; its
/// content is what auto-save persists and what submit sends.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComposerState<'a> {
    pub text_area: AppTextArea<'a>,
    /// Edits not yet flushed to the draft file.
    pub dirty: bool,
}

impl ComposerState<'_> {
    #[must_use]
    pub fn text(&self) -> String {
        self.text_area.lines().join("\n")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text_area.lines().iter().all(|l| l.is_empty())
    }

    /// Byte offset of the caret within [`Self::text`].
    #[must_use]
    pub fn caret_byte(&self) -> usize {
        let (row, col) = self.text_area.cursor();
        let lines = self.text_area.lines();
        let mut offset = 0;
        for line in lines.iter().take(row) {
            offset += line.len() + 1;
        }
        if let Some(line) = lines.get(row) {
            offset += line
                .char_indices()
                .nth(col)
                .map_or(line.len(), |(i, _)| i);
        }
        offset
    }

    #[must_use]
    pub fn text_before_caret(&self) -> String {
        let mut text = self.text();
        text.truncate(self.caret_byte());
        text
    }

    /// Replace the whole content and park the caret at `caret` (byte offset,
    /// clamped). Used by template commits and draft restore.
    pub fn set_text(&mut self, text: &str, caret: usize) {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let caret = caret.min(text.len());
        let mut row = 0;
        let mut col = 0;
        let mut seen = 0;
        for (i, line) in lines.iter().enumerate() {
            if caret <= seen + line.len() {
                row = i;
                col = line[..caret - seen].chars().count();
                break;
            }
            seen += line.len() + 1;
            row = i + 1;
        }
        let mut area = TextArea::new(lines);
        area.move_cursor(CursorMove::Jump(row as u16, col as u16));
        self.text_area = AppTextArea(area);
    }

    /// Insert at the caret, reporting whether the composer accepted it.
    pub fn insert(&mut self, text: &str) -> bool {
        self.text_area.insert_str(text);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_byte_counts_lines_and_chars() {
        let mut c = ComposerState::default();
        c.set_text("ab\ncde", 5);
        assert_eq!(c.caret_byte(), 5);
        assert_eq!(c.text_before_caret(), "ab\ncd");
    }

    #[test]
    fn set_text_clamps_caret() {
        let mut c = ComposerState::default();
        c.set_text("hi", 99);
        assert_eq!(c.caret_byte(), 2);
    }

    #[test]
    fn caret_byte_handles_multibyte_chars() {
        let mut c = ComposerState::default();
        c.set_text("héllo", 3);
        assert_eq!(c.caret_byte(), 3);
        assert_eq!(c.text_before_caret(), "hé");
    }

    #[test]
    fn insert_lands_at_caret() {
        let mut c = ComposerState::default();
        c.set_text("ab", 1);
        assert!(c.insert("X"));
        assert_eq!(c.text(), "aXb");
    }
}
