use crate::app::features::{follow_up, slash_menu};
use crate::app::{
    action::{Action, UpdateResult},
    recovery,
    state::{AppMode, AppState, NoticeState, Panel, ThemeSelectionState},
};
use crate::theme::Theme;
use std::time::{Duration, Instant};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// How long transient confirmations stay on the status line.
pub const STATUS_TTL: Duration = Duration::from_millis(2500);
/// Error notices linger longer so their suggestions are readable.
pub const ERROR_TTL: Duration = Duration::from_secs(6);

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::Quit => {
            state.should_quit = true;
            UpdateResult::Handled(None)
        }
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            state.spinner =
                SPINNER_FRAMES[(state.frame_count as usize) % SPINNER_FRAMES.len()].to_string();
            if state
                .status_clear_time
                .is_some_and(|at| Instant::now() >= at)
            {
                state.status_message = None;
                state.status_clear_time = None;
            }
            let error_expired = state.last_error.as_ref().is_some_and(|notice| {
                chrono::Local::now()
                    .signed_duration_since(notice.timestamp)
                    .num_milliseconds()
                    >= ERROR_TTL.as_millis() as i64
            });
            if error_expired {
                state.last_error = None;
            }
            UpdateResult::Handled(None)
        }
        Action::CancelMode => {
            if state.last_error.is_some() {
                state.last_error = None;
            } else if state.mode != AppMode::Normal {
                state.mode = AppMode::Normal;
                state.theme_selection = None;
            } else if state.follow_up.is_shown() || state.transcript.selection.is_some() {
                follow_up::dismiss(state);
                state.transcript.clear_selection();
            }
            UpdateResult::Handled(None)
        }
        Action::ToggleHelp => {
            state.mode = if state.mode == AppMode::Help {
                AppMode::Normal
            } else {
                AppMode::Help
            };
            UpdateResult::Handled(None)
        }
        Action::EnterThemeSelection => {
            state.mode = AppMode::ThemeSelection;
            state.theme_selection = Some(ThemeSelectionState::default());
            UpdateResult::Handled(None)
        }
        Action::SelectThemeNext => {
            if let Some(ts) = &mut state.theme_selection {
                ts.selected_index = (ts.selected_index + 1) % ts.themes.len();
            }
            UpdateResult::Handled(None)
        }
        Action::SelectThemePrev => {
            if let Some(ts) = &mut state.theme_selection {
                if ts.selected_index == 0 {
                    ts.selected_index = ts.themes.len() - 1;
                } else {
                    ts.selected_index -= 1;
                }
            }
            UpdateResult::Handled(None)
        }
        Action::SwitchTheme(palette) => {
            state.palette_type = *palette;
            state.theme = Theme::from_palette_type(*palette);
            state.mode = AppMode::Normal;
            state.theme_selection = None;
            UpdateResult::Handled(None)
        }
        Action::FocusComposer => {
            state.focused_panel = Panel::Composer;
            UpdateResult::Handled(None)
        }
        Action::FocusTranscript => {
            state.focused_panel = Panel::Transcript;
            slash_menu::close(state);
            UpdateResult::Handled(None)
        }
        Action::OperationStarted(msg) => {
            state.active_tasks.push(msg.clone());
            state.status_message = Some(msg.clone());
            state.status_clear_time = None;
            UpdateResult::Handled(None)
        }
        Action::OperationCompleted(result) => {
            state.active_tasks.pop();
            match result {
                Ok(msg) => {
                    state.status_message = Some(msg.clone());
                    state.status_clear_time = Some(Instant::now() + STATUS_TTL);
                }
                Err(err) => {
                    tracing::warn!("operation failed: {err}");
                    state.status_message = None;
                    state.last_error = Some(NoticeState::error(
                        err.clone(),
                        recovery::get_suggestions(err),
                    ));
                }
            }
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_operation_sets_expiring_status() {
        let mut state = AppState::default();
        update(
            &mut state,
            &Action::OperationStarted("Sending...".to_string()),
        );
        assert_eq!(state.status_message.as_deref(), Some("Sending..."));
        assert!(state.status_clear_time.is_none());

        update(
            &mut state,
            &Action::OperationCompleted(Ok("Message appended".to_string())),
        );
        assert_eq!(state.status_message.as_deref(), Some("Message appended"));
        assert!(state.status_clear_time.is_some());
        assert!(state.active_tasks.is_empty());
    }

    #[test]
    fn failed_operation_raises_notice_not_status() {
        let mut state = AppState::default();
        update(
            &mut state,
            &Action::OperationCompleted(Err("disk full".to_string())),
        );
        assert!(state.status_message.is_none());
        assert_eq!(state.last_error.as_ref().unwrap().message, "disk full");
    }

    #[test]
    fn cancel_clears_notice_before_anything_else() {
        let mut state = AppState::default();
        state.last_error = Some(NoticeState::error("boom", Vec::new()));
        state.mode = AppMode::Help;
        update(&mut state, &Action::CancelMode);
        assert!(state.last_error.is_none());
        assert_eq!(state.mode, AppMode::Help);
        update(&mut state, &Action::CancelMode);
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn theme_cycle_wraps() {
        let mut state = AppState::default();
        update(&mut state, &Action::EnterThemeSelection);
        let count = state.theme_selection.as_ref().unwrap().themes.len();
        for _ in 0..count {
            update(&mut state, &Action::SelectThemeNext);
        }
        assert_eq!(state.theme_selection.as_ref().unwrap().selected_index, 0);
    }
}
