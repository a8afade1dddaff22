use crate::app::state::timers::{AUTOSAVE_DELAY, FOLLOW_UP_DEBOUNCE, FOLLOW_UP_GRACE};
use crate::app::{
    action::{Action, PointerTarget, UpdateResult},
    state::{AppState, FollowUpPhase, NoticeState, OverlayBox, Panel, TimerKind, PILL_LABEL},
    ui,
};
use crate::domain::coordinator::{resolve_overlap, ActiveFeature};
use crate::domain::eligibility::{classify, ClassifyContext};
use crate::domain::placement::{place, OverlayAnchor};
use crate::domain::selection::{distance_to_rect, SelectionSnapshot};
use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

/// How far (in cells) a pointer press may land from the pill before it
/// counts as an explicit dismissal rather than interaction nearby.
pub const DISMISS_DISTANCE: u16 = 3;

/// Selection-length delta below which a change is treated as jitter: the
/// pill repositions but eligibility is not re-run.
pub const UPDATE_TOLERANCE: usize = 2;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::TimerElapsed(TimerKind::FollowUpDebounce) => {
            state.timers.clear(TimerKind::FollowUpDebounce);
            if state.follow_up.phase == FollowUpPhase::Pending {
                show_if_eligible(state);
            }
            UpdateResult::Handled(None)
        }
        Action::TimerElapsed(TimerKind::FollowUpGrace) => {
            state.timers.clear(TimerKind::FollowUpGrace);
            if state.follow_up.phase == FollowUpPhase::Grace && !state.follow_up.hovered {
                dismiss(state);
            }
            UpdateResult::Handled(None)
        }
        Action::PointerMoved { x, y } => {
            track_hover(state, *x, *y);
            UpdateResult::Handled(None)
        }
        Action::PointerDown { x, y, target } => {
            // Observational only: a press far from the pill dismisses it,
            // but the press itself still belongs to the pane features.
            if *target != PointerTarget::FollowUpPill {
                if let Some(rect) = state.follow_up.overlay.as_ref().map(|o| o.rect) {
                    if distance_to_rect(*x, *y, rect) > DISMISS_DISTANCE {
                        dismiss(state);
                    }
                }
            }
            UpdateResult::NotHandled
        }
        Action::ActivateFollowUp => {
            deliver_to_composer(state);
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Reconcile the pill lifecycle with the selection the pane features just
/// produced. The reducer runs this after every action that can move, grow,
/// or clear the transcript selection.
pub fn sync_selection(state: &mut AppState) {
    let live = live_snapshot(state);
    match state.follow_up.phase {
        FollowUpPhase::Absent | FollowUpPhase::Pending => {
            if let Some(snapshot) = live {
                // Every event within a drag restarts the window, so a burst
                // of changes collapses into one show decision at the end.
                state.follow_up.phase = FollowUpPhase::Pending;
                state.follow_up.snapshot = Some(snapshot);
                state
                    .timers
                    .arm(TimerKind::FollowUpDebounce, FOLLOW_UP_DEBOUNCE);
            }
        }
        FollowUpPhase::Visible => match live {
            Some(snapshot) => refresh_visible(state, snapshot),
            None => {
                state.follow_up.phase = FollowUpPhase::Grace;
                if !state.follow_up.hovered {
                    state.timers.arm(TimerKind::FollowUpGrace, FOLLOW_UP_GRACE);
                }
            }
        },
        FollowUpPhase::Grace => {
            if let Some(snapshot) = live {
                if classify(&snapshot, &classify_context(state)) {
                    state.timers.clear(TimerKind::FollowUpGrace);
                    let rect = pill_rect(state, snapshot.rect);
                    state.follow_up.phase = FollowUpPhase::Visible;
                    state.follow_up.snapshot = Some(snapshot);
                    state.follow_up.overlay = Some(OverlayBox {
                        rect,
                        label: PILL_LABEL.to_string(),
                    });
                }
            }
        }
    }
}

/// Tear the pill down completely: timers, arbitration slot, overlay.
pub fn dismiss(state: &mut AppState) {
    state.timers.clear(TimerKind::FollowUpDebounce);
    state.timers.clear(TimerKind::FollowUpGrace);
    state.arbiter.deactivate(ActiveFeature::FollowUp);
    state.follow_up.reset();
}

fn show_if_eligible(state: &mut AppState) {
    let Some(snapshot) = live_snapshot(state) else {
        state.follow_up.reset();
        return;
    };
    if !classify(&snapshot, &classify_context(state))
        || !state.arbiter.can_activate(ActiveFeature::FollowUp)
    {
        state.follow_up.reset();
        return;
    }
    let rect = pill_rect(state, snapshot.rect);
    state.arbiter.activate(ActiveFeature::FollowUp);
    state.follow_up.phase = FollowUpPhase::Visible;
    state.follow_up.snapshot = Some(snapshot);
    state.follow_up.overlay = Some(OverlayBox {
        rect,
        label: PILL_LABEL.to_string(),
    });
}

fn refresh_visible(state: &mut AppState, snapshot: SelectionSnapshot) {
    let stored_len = state
        .follow_up
        .snapshot
        .as_ref()
        .map_or(0, |s| s.text.chars().count());
    let delta = stored_len.abs_diff(snapshot.text.chars().count());
    if delta > UPDATE_TOLERANCE {
        if !classify(&snapshot, &classify_context(state)) {
            dismiss(state);
            return;
        }
        state.follow_up.snapshot = Some(snapshot.clone());
    }
    // Geometry can move (scroll, rewrap) even when the text did not.
    let rect = pill_rect(state, snapshot.rect);
    if let Some(overlay) = &mut state.follow_up.overlay {
        overlay.rect = rect;
    }
}

fn track_hover(state: &mut AppState, x: u16, y: u16) {
    let Some(rect) = state.follow_up.overlay.as_ref().map(|o| o.rect) else {
        return;
    };
    let inside = rect.contains(Position::new(x, y));
    if inside && !state.follow_up.hovered {
        state.follow_up.hovered = true;
        if state.follow_up.phase == FollowUpPhase::Grace {
            // Hover rescinds the pending removal.
            state.timers.clear(TimerKind::FollowUpGrace);
            state.follow_up.phase = FollowUpPhase::Visible;
        }
    } else if !inside && state.follow_up.hovered {
        state.follow_up.hovered = false;
        if state.follow_up.phase == FollowUpPhase::Visible && live_snapshot(state).is_none() {
            state.follow_up.phase = FollowUpPhase::Grace;
            state.timers.arm(TimerKind::FollowUpGrace, FOLLOW_UP_GRACE);
        }
    }
}

/// The pill was clicked. The selection is re-read at click time so a
/// selection extended after the pill appeared is what gets delivered; the
/// capture from show time covers a selection that was cleared or grew past
/// eligibility before the click landed.
fn deliver_to_composer(state: &mut AppState) {
    let captured = state.follow_up.snapshot.clone();
    let text = match live_snapshot(state) {
        Some(live) if classify(&live, &classify_context(state)) => live.text,
        _ => match captured {
            Some(snapshot) => snapshot.text,
            None => {
                dismiss(state);
                return;
            }
        },
    };
    if state.composer.insert(&citation(&text)) {
        state.focused_panel = Panel::Composer;
        state.composer.dirty = true;
        state.timers.arm(TimerKind::AutosaveFlush, AUTOSAVE_DELAY);
    } else {
        state.last_error = Some(NoticeState::error(
            "Could not insert the follow-up into the composer",
            Vec::new(),
        ));
    }
    dismiss(state);
}

fn citation(text: &str) -> String {
    format!("↪ \"{text}\"\n")
}

fn live_snapshot(state: &AppState) -> Option<SelectionSnapshot> {
    let viewport = ui::get_layout(state.frame).transcript_inner();
    state.transcript.selection_snapshot(viewport)
}

fn classify_context(state: &AppState) -> ClassifyContext {
    ClassifyContext {
        input_rects: vec![ui::get_layout(state.frame).composer],
    }
}

fn pill_rect(state: &AppState, selection: Rect) -> Rect {
    let frame = state.frame;
    let size = (PILL_LABEL.width() as u16, 1);
    let anchor = if selection.width == 0 || selection.height == 0 {
        // Anchor geometry is gone (scrolled out); park on the pane instead.
        OverlayAnchor::Region(ui::get_layout(frame).transcript_inner())
    } else {
        OverlayAnchor::Selection(selection)
    };
    let mut rect = place(anchor, size, frame);
    if let Some(menu) = &state.slash_menu {
        rect = resolve_overlap(rect, menu.rect, frame);
    }
    rect
}
