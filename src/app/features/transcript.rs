use crate::app::features::follow_up;
use crate::app::{
    action::{Action, PointerTarget, UpdateResult},
    command::Command,
    recovery,
    state::{AppMode, AppState, NoticeState, Panel},
    ui,
};
use crate::domain::transcript_layout::{self, LayoutLine, SelectionSpan, TextPoint};
use ratatui::layout::Rect;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::Resize(w, h) => {
            state.frame = Rect::new(0, 0, *w, *h);
            let viewport = viewport(state);
            state.transcript.relayout(viewport.width);
            state.transcript.scroll_by(0, viewport.height);
            UpdateResult::Handled(None)
        }
        Action::ScrollTranscript(delta) => {
            let height = viewport(state).height;
            state.transcript.scroll_by(*delta, height);
            UpdateResult::Handled(None)
        }
        Action::PointerDown { x, y, target } => {
            match target {
                PointerTarget::Transcript => {
                    state.focused_panel = Panel::Transcript;
                    begin_selection(state, *x, *y);
                }
                PointerTarget::Composer => {
                    // Focus moves; the transcript selection survives so slash
                    // previews and commits can still read it.
                    state.focused_panel = Panel::Composer;
                }
                PointerTarget::Chrome => {
                    state.transcript.clear_selection();
                }
                PointerTarget::FollowUpPill | PointerTarget::SlashRow(_) => {}
            }
            UpdateResult::Handled(None)
        }
        Action::PointerDrag { x, y } => {
            extend_to_cell(state, *x, *y);
            UpdateResult::Handled(None)
        }
        Action::PointerUp { x, y } => {
            extend_to_cell(state, *x, *y);
            state.transcript.dragging = false;
            UpdateResult::Handled(None)
        }
        Action::SelectWord { x, y } => {
            select_word(state, *x, *y);
            UpdateResult::Handled(None)
        }
        Action::ExtendSelection(step) => {
            extend_by_step(state, *step);
            UpdateResult::Handled(None)
        }
        Action::ClearSelection => {
            state.transcript.clear_selection();
            UpdateResult::Handled(None)
        }
        Action::SessionLoaded(conversation) => {
            let viewport = viewport(state);
            state
                .transcript
                .replace_conversation((**conversation).clone(), viewport.width);
            // Old text points are meaningless against the new content.
            follow_up::dismiss(state);
            state.transcript.scroll = state.transcript.max_scroll(viewport.height);
            state.header_state.stats_text =
                format!(" {} messages ", conversation.messages.len());
            state.header_state.session_text = state
                .session_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map_or_else(
                    || " no session ".to_string(),
                    |name| format!(" {} ", name.to_string_lossy()),
                );
            if state.mode == AppMode::Loading {
                state.mode = AppMode::Normal;
            }
            UpdateResult::Handled(None)
        }
        Action::SessionLoadFailed(err) => {
            state.last_error = Some(NoticeState::error(
                format!("Could not load transcript: {err}"),
                recovery::get_suggestions(err),
            ));
            if state.mode == AppMode::Loading {
                state.mode = AppMode::Normal;
            }
            UpdateResult::Handled(None)
        }
        Action::SessionFileChanged => {
            // External edit to the transcript file; reload wholesale.
            UpdateResult::Handled(Some(Command::LoadSession))
        }
        _ => UpdateResult::NotHandled,
    }
}

fn viewport(state: &AppState) -> Rect {
    ui::get_layout(state.frame).transcript_inner()
}

fn begin_selection(state: &mut AppState, x: u16, y: u16) {
    let viewport = viewport(state);
    let t = &mut state.transcript;
    let Some(conversation) = &t.conversation else {
        return;
    };
    match transcript_layout::hit_test(&t.layout, conversation, viewport, t.scroll, x, y, false) {
        Some(point) => {
            t.selection = Some(SelectionSpan::collapsed(point));
            t.dragging = true;
        }
        None => t.clear_selection(),
    }
}

fn extend_to_cell(state: &mut AppState, x: u16, y: u16) {
    let viewport = viewport(state);
    let t = &mut state.transcript;
    if !t.dragging {
        return;
    }
    let Some(conversation) = &t.conversation else {
        return;
    };
    if let Some(point) =
        transcript_layout::hit_test(&t.layout, conversation, viewport, t.scroll, x, y, false)
    {
        if let Some(span) = &mut t.selection {
            span.focus = point;
        }
    }
}

fn select_word(state: &mut AppState, x: u16, y: u16) {
    let viewport = viewport(state);
    let t = &mut state.transcript;
    let Some(conversation) = &t.conversation else {
        return;
    };
    let Some(point) =
        transcript_layout::hit_test(&t.layout, conversation, viewport, t.scroll, x, y, true)
    else {
        return;
    };
    if let Some(span) = transcript_layout::word_at(conversation, point) {
        t.selection = Some(span);
        t.dragging = false;
    }
}

fn extend_by_step(state: &mut AppState, step: transcript_layout::PointStep) {
    let t = &mut state.transcript;
    let Some(conversation) = &t.conversation else {
        return;
    };
    match &mut t.selection {
        Some(span) => {
            span.focus = transcript_layout::step_point(&t.layout, conversation, span.focus, step);
        }
        None => {
            // Keyboard selection without a prior anchor starts at the first
            // body row in view.
            let first = t.layout[t.scroll.min(t.layout.len().saturating_sub(1))..]
                .iter()
                .find_map(|line| match line {
                    LayoutLine::Body { msg, start, .. } => Some(TextPoint {
                        msg: *msg,
                        offset: *start,
                    }),
                    _ => None,
                });
            if let Some(point) = first {
                let mut span = SelectionSpan::collapsed(point);
                span.focus = transcript_layout::step_point(&t.layout, conversation, point, step);
                t.selection = Some(span);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Conversation, Message, Speaker};
    use crate::domain::transcript_layout::PointStep;

    fn loaded_state() -> AppState<'static> {
        let mut state = AppState::default();
        let width = ui::get_layout(state.frame).transcript_inner().width;
        state.transcript.replace_conversation(
            Conversation {
                title: None,
                messages: vec![Message {
                    speaker: Speaker::Assistant,
                    body: "alpha beta gamma".to_string(),
                }],
            },
            width,
        );
        state
    }

    // With the default 80x24 frame the transcript text viewport starts at
    // (1, 2); the header row renders at y=2 and the body row at y=3, with
    // body text indented two cells to x=3.
    const BODY_Y: u16 = 3;
    const TEXT_X: u16 = 3;

    #[test]
    fn drag_gesture_builds_selection() {
        let mut state = loaded_state();
        update(
            &mut state,
            &Action::PointerDown {
                x: TEXT_X,
                y: BODY_Y,
                target: PointerTarget::Transcript,
            },
        );
        assert!(state.transcript.dragging);
        update(&mut state, &Action::PointerDrag { x: TEXT_X + 7, y: BODY_Y });
        update(&mut state, &Action::PointerUp { x: TEXT_X + 10, y: BODY_Y });
        assert!(!state.transcript.dragging);
        assert_eq!(
            state.transcript.live_selection_text().as_deref(),
            Some("alpha beta")
        );
    }

    #[test]
    fn double_click_selects_word() {
        let mut state = loaded_state();
        update(
            &mut state,
            &Action::SelectWord {
                x: TEXT_X + 6,
                y: BODY_Y,
            },
        );
        assert_eq!(
            state.transcript.live_selection_text().as_deref(),
            Some("beta")
        );
    }

    #[test]
    fn shift_arrows_extend_without_prior_selection() {
        let mut state = loaded_state();
        for _ in 0..5 {
            update(
                &mut state,
                &Action::ExtendSelection(PointStep::CharRight),
            );
        }
        assert_eq!(
            state.transcript.live_selection_text().as_deref(),
            Some("alpha")
        );
    }

    #[test]
    fn chrome_press_clears_selection() {
        let mut state = loaded_state();
        update(
            &mut state,
            &Action::SelectWord {
                x: TEXT_X,
                y: BODY_Y,
            },
        );
        assert!(state.transcript.selection.is_some());
        update(
            &mut state,
            &Action::PointerDown {
                x: 0,
                y: 0,
                target: PointerTarget::Chrome,
            },
        );
        assert!(state.transcript.selection.is_none());
    }

    #[test]
    fn composer_press_keeps_selection_but_moves_focus() {
        let mut state = loaded_state();
        update(
            &mut state,
            &Action::SelectWord {
                x: TEXT_X,
                y: BODY_Y,
            },
        );
        update(
            &mut state,
            &Action::PointerDown {
                x: 3,
                y: 20,
                target: PointerTarget::Composer,
            },
        );
        assert_eq!(state.focused_panel, Panel::Composer);
        assert!(state.transcript.selection.is_some());
    }

    #[test]
    fn session_load_replaces_content_and_scrolls_to_tail() {
        let mut state = loaded_state();
        let many = Conversation {
            title: Some("Long chat".to_string()),
            messages: (0..40)
                .map(|i| Message {
                    speaker: if i % 2 == 0 {
                        Speaker::User
                    } else {
                        Speaker::Assistant
                    },
                    body: format!("message number {i}"),
                })
                .collect(),
        };
        update(&mut state, &Action::SessionLoaded(Box::new(many)));
        let viewport_height = ui::get_layout(state.frame).transcript_inner().height;
        assert_eq!(
            state.transcript.scroll,
            state.transcript.max_scroll(viewport_height)
        );
        assert!(state.transcript.selection.is_none());
        assert_eq!(state.header_state.stats_text, " 40 messages ");
    }

    #[test]
    fn file_change_triggers_reload_command() {
        let mut state = loaded_state();
        let result = update(&mut state, &Action::SessionFileChanged);
        assert!(matches!(
            result,
            UpdateResult::Handled(Some(Command::LoadSession))
        ));
    }
}
