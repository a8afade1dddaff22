use crate::app::state::timers::{AUTOSAVE_DELAY, AUTOSAVE_RETRY};
use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    persistence,
    state::{AppState, NoticeState, TimerKind},
};
use crate::domain::coordinator::ActiveFeature;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::ComposerInput(key) => {
            if state.composer.text_area.input(*key) {
                state.composer.dirty = true;
                state.timers.arm(TimerKind::AutosaveFlush, AUTOSAVE_DELAY);
            }
            UpdateResult::Handled(None)
        }
        Action::TimerElapsed(TimerKind::AutosaveFlush) => {
            state.timers.clear(TimerKind::AutosaveFlush);
            flush_draft(state);
            UpdateResult::Handled(None)
        }
        Action::SubmitDraft => {
            let text = state.composer.text();
            if text.trim().is_empty() {
                return UpdateResult::Handled(None);
            }
            if state.session_path.is_none() {
                state.last_error = Some(NoticeState::error(
                    "No transcript file open; start with: riposte <file>",
                    Vec::new(),
                ));
                return UpdateResult::Handled(None);
            }
            UpdateResult::Handled(Some(Command::AppendUserMessage(text)))
        }
        Action::DraftSubmitted => {
            state.composer.set_text("", 0);
            state.composer.dirty = false;
            state.timers.clear(TimerKind::AutosaveFlush);
            persistence::clear_draft();
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Write the draft out, unless an overlay currently owns the screen; losing
/// arbitration just pushes the flush back rather than dropping it.
fn flush_draft(state: &mut AppState) {
    if !state.composer.dirty {
        return;
    }
    if !state.arbiter.can_activate(ActiveFeature::AutoSave) {
        state.timers.arm(TimerKind::AutosaveFlush, AUTOSAVE_RETRY);
        return;
    }
    match persistence::save_draft(&state.composer.text()) {
        Ok(()) => {
            state.composer.dirty = false;
        }
        Err(err) => {
            tracing::warn!("draft save failed: {err}");
            state.last_error = Some(NoticeState::error(
                format!("Draft auto-save failed: {err}"),
                crate::app::recovery::get_suggestions(&err.to_string()),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};

    #[test]
    fn typing_marks_dirty_and_arms_autosave() {
        let mut state = AppState::default();
        update(
            &mut state,
            &Action::ComposerInput(KeyEvent::from(KeyCode::Char('h'))),
        );
        assert_eq!(state.composer.text(), "h");
        assert!(state.composer.dirty);
        assert!(state.timers.is_armed(TimerKind::AutosaveFlush));
    }

    #[test]
    fn cursor_motion_does_not_dirty() {
        let mut state = AppState::default();
        update(
            &mut state,
            &Action::ComposerInput(KeyEvent::from(KeyCode::Left)),
        );
        assert!(!state.composer.dirty);
        assert!(!state.timers.is_armed(TimerKind::AutosaveFlush));
    }

    #[test]
    fn flush_defers_while_an_overlay_is_active() {
        let mut state = AppState::default();
        state.composer.set_text("draft", 5);
        state.composer.dirty = true;
        state.arbiter.activate(ActiveFeature::FollowUp);

        update(&mut state, &Action::TimerElapsed(TimerKind::AutosaveFlush));
        assert!(state.composer.dirty);
        assert!(state.timers.is_armed(TimerKind::AutosaveFlush));
    }

    #[test]
    fn empty_draft_does_not_submit() {
        let mut state = AppState::default();
        state.composer.set_text("   \n", 0);
        let result = update(&mut state, &Action::SubmitDraft);
        assert!(matches!(result, UpdateResult::Handled(None)));
    }

    #[test]
    fn submit_produces_append_command() {
        let mut state = AppState::default();
        state.session_path = Some(std::path::PathBuf::from("chat.md"));
        state.composer.set_text("What about shade plants?", 5);
        let result = update(&mut state, &Action::SubmitDraft);
        match result {
            UpdateResult::Handled(Some(Command::AppendUserMessage(text))) => {
                assert_eq!(text, "What about shade plants?");
            }
            other => panic!("expected append command, got {other:?}"),
        }
    }

    #[test]
    fn submitted_draft_clears_composer() {
        let mut state = AppState::default();
        state.composer.set_text("sent", 4);
        state.composer.dirty = true;
        state.timers.arm(TimerKind::AutosaveFlush, AUTOSAVE_DELAY);

        update(&mut state, &Action::DraftSubmitted);
        assert!(state.composer.is_empty());
        assert!(!state.composer.dirty);
        assert!(!state.timers.is_armed(TimerKind::AutosaveFlush));
    }
}
