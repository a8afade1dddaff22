use crate::domain::models::Conversation;
use crate::domain::selection::{RegionRole, SelectionSnapshot};
use crate::domain::transcript_layout::{self, LayoutLine, SelectionSpan};
use ratatui::layout::Rect;

/// The transcript pane: loaded conversation, its laid-out rows for the
/// current width, scroll offset, and the live selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranscriptState {
    pub conversation: Option<Conversation>,
    pub layout: Vec<LayoutLine>,
    pub layout_width: u16,
    pub scroll: usize,
    pub selection: Option<SelectionSpan>,
    /// A drag gesture is in progress (between pointer down and up).
    pub dragging: bool,
}

impl TranscriptState {
    /// Rebuild the row layout for `width`. Cheap no-op when nothing changed;
    /// callers invoke it on resize and on conversation replacement.
    pub fn relayout(&mut self, width: u16) {
        if self.layout_width == width && !self.layout.is_empty() {
            return;
        }
        self.layout_width = width;
        self.layout = match &self.conversation {
            Some(c) => transcript_layout::layout(c, width),
            None => Vec::new(),
        };
    }

    /// Replace the conversation, keeping scroll within bounds and dropping
    /// any selection into the old text.
    pub fn replace_conversation(&mut self, conversation: Conversation, width: u16) {
        self.conversation = Some(conversation);
        self.layout_width = 0; // force
        self.relayout(width);
        self.selection = None;
        self.dragging = false;
    }

    #[must_use]
    pub fn max_scroll(&self, viewport_height: u16) -> usize {
        self.layout.len().saturating_sub(viewport_height as usize)
    }

    pub fn scroll_by(&mut self, delta: isize, viewport_height: u16) {
        let max = self.max_scroll(viewport_height);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    /// Text of the live selection, if any is present and non-collapsed.
    #[must_use]
    pub fn live_selection_text(&self) -> Option<String> {
        let conversation = self.conversation.as_ref()?;
        let span = self.selection.as_ref()?;
        let text = transcript_layout::selection_text(conversation, span);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Snapshot of the live selection against `viewport`. The rect is
    /// zero-sized when the selection is scrolled out of view; the classifier
    /// treats that as not renderable.
    #[must_use]
    pub fn selection_snapshot(&self, viewport: Rect) -> Option<SelectionSnapshot> {
        let conversation = self.conversation.as_ref()?;
        let span = self.selection.as_ref()?;
        if span.is_collapsed() {
            return None;
        }
        let rect = transcript_layout::selection_rect(
            &self.layout,
            conversation,
            span,
            viewport,
            self.scroll,
        );
        let text = transcript_layout::selection_text(conversation, span);
        Some(SelectionSnapshot::new(text, rect, RegionRole::Readonly))
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.dragging = false;
    }
}
