use crate::domain::selection::SelectionSnapshot;
use ratatui::layout::Rect;

/// Label of the action pill. Its display width sets the overlay width.
pub const PILL_LABEL: &str = " ↪ Follow up ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowUpPhase {
    #[default]
    Absent,
    /// Debounce window open; a candidate snapshot is held but nothing shows.
    Pending,
    Visible,
    /// Selection gone, pill still shown awaiting a click.
    Grace,
}

/// The pill's screen box. Exists only while the pill is rendered: dismissal
/// destroys it rather than hiding it.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    pub rect: Rect,
    pub label: String,
}

/// Lifecycle state of the follow-up overlay.
///
/// Invariants the tests walk: `overlay` is Some iff `phase` is Visible or
/// Grace; `snapshot` is Some iff `phase` is not Absent; `hovered` implies
/// `overlay` is Some.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FollowUpState {
    pub phase: FollowUpPhase,
    /// Candidate selection while Pending; captured selection once shown.
    pub snapshot: Option<SelectionSnapshot>,
    pub overlay: Option<OverlayBox>,
    pub hovered: bool,
}

impl FollowUpState {
    #[must_use]
    pub fn is_shown(&self) -> bool {
        matches!(self.phase, FollowUpPhase::Visible | FollowUpPhase::Grace)
    }

    /// Drop back to Absent, destroying the overlay and forgetting the
    /// snapshot. The single exit path every dismissal funnels through.
    pub fn reset(&mut self) {
        self.phase = FollowUpPhase::Absent;
        self.snapshot = None;
        self.overlay = None;
        self.hovered = false;
    }
}
