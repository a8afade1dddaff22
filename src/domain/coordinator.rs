use crate::domain::placement::clamp_to;
use ratatui::layout::Rect;

/// Minimum clear cells kept between two overlays after conflict resolution.
pub const MIN_OVERLAY_GAP: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFeature {
    FollowUp,
    SlashMenu,
    AutoSave,
}

impl ActiveFeature {
    fn priority(self) -> u8 {
        match self {
            ActiveFeature::FollowUp => 2,
            ActiveFeature::SlashMenu => 1,
            ActiveFeature::AutoSave => 0,
        }
    }
}

/// Advisory arbitration for screen-space ownership. One slot, static
/// priorities, last writer wins among equal-or-higher requesters. Never
/// blocks or queues: a denied feature simply does not show UI this cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayArbiter {
    active: Option<ActiveFeature>,
}

impl OverlayArbiter {
    #[must_use]
    pub fn can_activate(&self, feature: ActiveFeature) -> bool {
        match self.active {
            None => true,
            Some(current) => feature.priority() >= current.priority(),
        }
    }

    pub fn activate(&mut self, feature: ActiveFeature) {
        self.active = Some(feature);
    }

    /// Release the slot, but only if `feature` still owns it. A feature that
    /// was displaced by a higher-priority one must not clear the usurper.
    pub fn deactivate(&mut self, feature: ActiveFeature) {
        if self.active == Some(feature) {
            self.active = None;
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<ActiveFeature> {
        self.active
    }
}

/// Nudge `candidate` away from `other` until the two rects no longer sit
/// within [`MIN_OVERLAY_GAP`] of each other: first straight down below
/// `other`, then to its right if below does not fit, then re-clamp. The
/// result may still touch `other` when the frame is too small for both; the
/// clamp bound always wins.
#[must_use]
pub fn resolve_overlap(candidate: Rect, other: Rect, frame: Rect) -> Rect {
    let padded = inflate(other, MIN_OVERLAY_GAP);
    if !candidate.intersects(padded) {
        return clamp_to(candidate, frame);
    }

    let below = Rect::new(
        candidate.x,
        padded.y.saturating_add(padded.height),
        candidate.width,
        candidate.height,
    );
    if below.y + below.height <= frame.y + frame.height {
        return clamp_to(below, frame);
    }

    let right = Rect::new(
        padded.x.saturating_add(padded.width),
        candidate.y,
        candidate.width,
        candidate.height,
    );
    clamp_to(right, frame)
}

fn inflate(rect: Rect, by: u16) -> Rect {
    Rect::new(
        rect.x.saturating_sub(by),
        rect.y.saturating_sub(by),
        rect.width.saturating_add(2 * by),
        rect.height.saturating_add(2 * by),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_slot_admits_anyone() {
        let arb = OverlayArbiter::default();
        assert!(arb.can_activate(ActiveFeature::FollowUp));
        assert!(arb.can_activate(ActiveFeature::SlashMenu));
        assert!(arb.can_activate(ActiveFeature::AutoSave));
    }

    #[test]
    fn priority_order_follow_up_over_slash_over_autosave() {
        let mut arb = OverlayArbiter::default();
        arb.activate(ActiveFeature::SlashMenu);
        assert!(arb.can_activate(ActiveFeature::FollowUp));
        assert!(!arb.can_activate(ActiveFeature::AutoSave));

        arb.activate(ActiveFeature::FollowUp);
        assert!(!arb.can_activate(ActiveFeature::SlashMenu));
    }

    #[test]
    fn equal_priority_wins_and_overwrites() {
        let mut arb = OverlayArbiter::default();
        arb.activate(ActiveFeature::FollowUp);
        assert!(arb.can_activate(ActiveFeature::FollowUp));
        arb.activate(ActiveFeature::FollowUp);
        assert_eq!(arb.active(), Some(ActiveFeature::FollowUp));
    }

    #[test]
    fn deactivate_only_clears_own_slot() {
        let mut arb = OverlayArbiter::default();
        arb.activate(ActiveFeature::SlashMenu);
        arb.activate(ActiveFeature::FollowUp);
        arb.deactivate(ActiveFeature::SlashMenu);
        assert_eq!(arb.active(), Some(ActiveFeature::FollowUp));
        arb.deactivate(ActiveFeature::FollowUp);
        assert_eq!(arb.active(), None);
    }

    #[test]
    fn non_overlapping_candidate_passes_through_clamped() {
        let frame = Rect::new(0, 0, 80, 24);
        let candidate = Rect::new(2, 2, 10, 1);
        let other = Rect::new(40, 10, 10, 4);
        assert_eq!(resolve_overlap(candidate, other, frame), candidate);
    }

    #[test]
    fn overlapping_candidate_moves_below_with_gap() {
        let frame = Rect::new(0, 0, 80, 24);
        let other = Rect::new(10, 5, 20, 4);
        let candidate = Rect::new(12, 6, 14, 2);
        let resolved = resolve_overlap(candidate, other, frame);
        assert!(resolved.y >= other.y + other.height + MIN_OVERLAY_GAP);
        assert!(!resolved.intersects(other));
    }

    #[test]
    fn falls_back_right_when_below_does_not_fit() {
        let frame = Rect::new(0, 0, 80, 12);
        let other = Rect::new(10, 6, 20, 5);
        let candidate = Rect::new(12, 7, 14, 3);
        let resolved = resolve_overlap(candidate, other, frame);
        assert!(resolved.x >= other.x + other.width + MIN_OVERLAY_GAP);
        assert!(resolved.x + resolved.width <= frame.x + frame.width);
    }

    #[test]
    fn resolution_stays_clamped_in_tiny_frames() {
        let frame = Rect::new(0, 0, 12, 4);
        let other = Rect::new(0, 0, 12, 4);
        let candidate = Rect::new(0, 0, 10, 2);
        let resolved = resolve_overlap(candidate, other, frame);
        assert!(resolved.x + resolved.width <= frame.width);
        assert!(resolved.y + resolved.height <= frame.height);
    }
}
