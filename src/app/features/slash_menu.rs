use crate::app::state::timers::AUTOSAVE_DELAY;
use crate::app::{
    action::{Action, PointerTarget, UpdateResult},
    command::Command,
    state::{AppState, NoticeState, Panel, SlashMenuState, TimerKind},
    ui,
};
use crate::components;
use crate::domain::commands::{self, slash_fragment};
use crate::domain::coordinator::{resolve_overlap, ActiveFeature};
use crate::domain::placement::{dropdown_width, place, OverlayAnchor};
use ratatui::layout::Rect;

/// Rows shown before the dropdown stops growing.
pub const MAX_VISIBLE_ROWS: usize = 6;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::SlashSelectNext => {
            if let Some(menu) = &mut state.slash_menu {
                menu.select_next();
            }
            UpdateResult::Handled(None)
        }
        Action::SlashSelectPrev => {
            if let Some(menu) = &mut state.slash_menu {
                menu.select_prev();
            }
            UpdateResult::Handled(None)
        }
        Action::SlashHover(row) => {
            if let Some(menu) = &mut state.slash_menu {
                if *row < menu.matches.len() {
                    menu.selected_index = *row;
                }
            }
            UpdateResult::Handled(None)
        }
        Action::SlashClose => {
            close(state);
            UpdateResult::Handled(None)
        }
        Action::SlashCommit => {
            match state.slash_menu.as_ref().and_then(SlashMenuState::selected_entry) {
                Some(index) => commit(state, index),
                None => close(state),
            }
            UpdateResult::Handled(None)
        }
        Action::SlashCommitEntry(row) => {
            match state
                .slash_menu
                .as_ref()
                .and_then(|menu| menu.matches.get(*row).copied())
            {
                Some(index) => commit(state, index),
                None => close(state),
            }
            UpdateResult::Handled(None)
        }
        Action::CommandsLoaded(table) => {
            // Store writes arrive as whole-table replacements.
            state.commands = table.clone();
            UpdateResult::Handled(None)
        }
        Action::CommandsLoadFailed(err) => {
            // The previous table stays live; losing completions beats
            // losing the composer.
            state.last_error = Some(NoticeState::error(
                format!("Command templates unavailable: {err}"),
                crate::app::recovery::get_suggestions(err),
            ));
            UpdateResult::Handled(None)
        }
        Action::CommandFileChanged => UpdateResult::Handled(Some(Command::LoadCommands)),
        Action::PointerDown { target, .. } => {
            // A press outside both the dropdown and the composer closes the
            // menu; the press still falls through to the pane features.
            if state.slash_menu.is_some() && *target != PointerTarget::Composer {
                close(state);
            }
            UpdateResult::NotHandled
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Reconcile the dropdown with the composer content and caret. The reducer
/// runs this after every action that can edit the draft or replace the
/// command table.
pub fn sync_with_composer(state: &mut AppState) {
    if state.focused_panel != Panel::Composer {
        close(state);
        return;
    }
    let before = state.composer.text_before_caret();
    let Some((slash_byte, fragment)) = slash_fragment(&before) else {
        close(state);
        return;
    };
    let matches = state.commands.prefix_matches(fragment);
    if matches.is_empty() {
        // Covers the bare "/" as well: opening needs a non-empty prefix.
        close(state);
        return;
    }
    if state.slash_menu.is_none() && !state.arbiter.can_activate(ActiveFeature::SlashMenu) {
        return;
    }
    let rect = dropdown_rect(state, matches.len());
    let query = fragment.to_string();
    match &mut state.slash_menu {
        Some(menu) => {
            if menu.matches != matches {
                menu.selected_index = 0;
            }
            menu.query = query;
            menu.slash_byte = slash_byte;
            menu.matches = matches;
            menu.rect = rect;
        }
        None => {
            state.arbiter.activate(ActiveFeature::SlashMenu);
            state.slash_menu = Some(SlashMenuState {
                query,
                slash_byte,
                matches,
                selected_index: 0,
                rect,
            });
        }
    }
}

pub fn close(state: &mut AppState) {
    if state.slash_menu.take().is_some() {
        state.arbiter.deactivate(ActiveFeature::SlashMenu);
    }
}

/// Replace the "/fragment" span with the chosen template, placeholder
/// substituted by the live transcript selection. Both the pattern and the
/// table entry are re-checked here: the composer may have been edited and
/// the table replaced between open and commit.
fn commit(state: &mut AppState, table_index: usize) {
    let before = state.composer.text_before_caret();
    let Some((slash_byte, fragment)) = slash_fragment(&before) else {
        close(state);
        return;
    };
    let Some(entry) = state.commands.entries().get(table_index) else {
        close(state);
        return;
    };
    if !entry
        .trigger
        .to_lowercase()
        .starts_with(&fragment.to_lowercase())
    {
        close(state);
        return;
    }
    let selection = state.transcript.live_selection_text().unwrap_or_default();
    let expansion = commands::expand_template(&entry.template, &selection);

    let text = state.composer.text();
    let caret = state.composer.caret_byte();
    let spliced = format!("{}{}{}", &text[..slash_byte], expansion, &text[caret..]);
    state.composer.set_text(&spliced, slash_byte + expansion.len());
    state.composer.dirty = true;
    state.timers.arm(TimerKind::AutosaveFlush, AUTOSAVE_DELAY);
    close(state);
}

fn dropdown_rect(state: &AppState, rows: usize) -> Rect {
    let frame = state.frame;
    let layout = ui::get_layout(frame);
    let width = dropdown_width(frame);
    let height = rows.min(MAX_VISIBLE_ROWS) as u16 + 2;
    let anchor =
        match components::composer::caret_screen_position(&state.composer, layout.composer_inner())
        {
            Some(pos) => OverlayAnchor::Caret(pos),
            None => OverlayAnchor::Region(layout.composer),
        };
    let mut rect = place(anchor, (width, height), frame);
    if let Some(overlay) = &state.follow_up.overlay {
        rect = resolve_overlap(rect, overlay.rect, frame);
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::{CommandEntry, CommandTable};
    use crate::domain::models::{Conversation, Message, Speaker};
    use crate::domain::transcript_layout::{SelectionSpan, TextPoint};

    fn table() -> CommandTable {
        CommandTable::new(vec![
            CommandEntry {
                trigger: "translate".to_string(),
                template: "Translate this: {text}".to_string(),
            },
            CommandEntry {
                trigger: "transform".to_string(),
                template: "Transform this: {text}".to_string(),
            },
            CommandEntry {
                trigger: "track".to_string(),
                template: "Track this: {text}".to_string(),
            },
        ])
    }

    fn composing(text: &str) -> AppState<'static> {
        let mut state = AppState::default();
        state.commands = table();
        state.focused_panel = Panel::Composer;
        state.composer.set_text(text, text.len());
        state
    }

    #[test]
    fn prefix_opens_menu_in_table_order() {
        let mut state = composing("/tra");
        sync_with_composer(&mut state);
        let menu = state.slash_menu.as_ref().unwrap();
        assert_eq!(menu.matches, vec![0, 1, 2]);
        assert_eq!(menu.selected_index, 0);
        assert_eq!(menu.query, "tra");
        assert_eq!(state.arbiter.active(), Some(ActiveFeature::SlashMenu));
    }

    #[test]
    fn bare_slash_does_not_open() {
        let mut state = composing("/");
        sync_with_composer(&mut state);
        assert!(state.slash_menu.is_none());
    }

    #[test]
    fn arrows_then_enter_commit_the_highlighted_entry() {
        let mut state = composing("/tra");
        sync_with_composer(&mut state);
        update(&mut state, &Action::SlashSelectNext);
        update(&mut state, &Action::SlashSelectNext);
        assert_eq!(
            state.slash_menu.as_ref().unwrap().selected_entry(),
            Some(2)
        );

        update(&mut state, &Action::SlashCommit);
        assert_eq!(state.composer.text(), "Track this: ");
        assert_eq!(state.composer.caret_byte(), "Track this: ".len());
        assert!(state.slash_menu.is_none());
        assert_eq!(state.arbiter.active(), None);
    }

    #[test]
    fn commit_substitutes_live_selection() {
        let mut state = composing("see /tra");
        let width = ui::get_layout(state.frame).transcript_inner().width;
        state.transcript.replace_conversation(
            Conversation {
                title: None,
                messages: vec![Message {
                    speaker: Speaker::Assistant,
                    body: "chlorophyll".to_string(),
                }],
            },
            width,
        );
        state.transcript.selection = Some(SelectionSpan {
            anchor: TextPoint { msg: 0, offset: 0 },
            focus: TextPoint {
                msg: 0,
                offset: 11,
            },
        });
        sync_with_composer(&mut state);
        update(&mut state, &Action::SlashCommit);
        assert_eq!(state.composer.text(), "see Translate this: chlorophyll");
    }

    #[test]
    fn pattern_gone_closes_without_committing() {
        let mut state = composing("/tra");
        sync_with_composer(&mut state);
        state.composer.set_text("plain text", 10);
        update(&mut state, &Action::SlashCommit);
        assert_eq!(state.composer.text(), "plain text");
        assert!(state.slash_menu.is_none());
    }

    #[test]
    fn stale_table_entry_is_a_noop_close() {
        let mut state = composing("/tra");
        sync_with_composer(&mut state);
        // The table shrinks behind the menu's back.
        state.commands = CommandTable::new(vec![CommandEntry {
            trigger: "zip".to_string(),
            template: "z".to_string(),
        }]);
        update(&mut state, &Action::SlashCommitEntry(2));
        assert_eq!(state.composer.text(), "/tra");
        assert!(state.slash_menu.is_none());
    }

    #[test]
    fn outside_press_closes_within_one_cycle() {
        let mut state = composing("/tra");
        sync_with_composer(&mut state);
        let result = update(
            &mut state,
            &Action::PointerDown {
                x: 0,
                y: 0,
                target: PointerTarget::Transcript,
            },
        );
        assert!(state.slash_menu.is_none());
        // The press is left for the pane features to act on.
        assert!(matches!(result, UpdateResult::NotHandled));
    }

    #[test]
    fn composer_press_keeps_menu_open() {
        let mut state = composing("/tra");
        sync_with_composer(&mut state);
        update(
            &mut state,
            &Action::PointerDown {
                x: 2,
                y: 20,
                target: PointerTarget::Composer,
            },
        );
        assert!(state.slash_menu.is_some());
    }

    #[test]
    fn narrowing_fragment_refilters_and_resets_highlight() {
        let mut state = composing("/tra");
        sync_with_composer(&mut state);
        update(&mut state, &Action::SlashSelectNext);

        state.composer.set_text("/tran", 5);
        sync_with_composer(&mut state);
        let menu = state.slash_menu.as_ref().unwrap();
        assert_eq!(menu.matches, vec![0, 1]);
        assert_eq!(menu.selected_index, 0);
    }

    #[test]
    fn table_replacement_refilters_open_menu() {
        let mut state = composing("/tra");
        sync_with_composer(&mut state);

        let replacement = CommandTable::new(vec![CommandEntry {
            trigger: "trace".to_string(),
            template: "Trace: {text}".to_string(),
        }]);
        update(&mut state, &Action::CommandsLoaded(replacement));
        sync_with_composer(&mut state);
        let menu = state.slash_menu.as_ref().unwrap();
        assert_eq!(menu.matches, vec![0]);
        assert_eq!(menu.query, "tra");
    }

    #[test]
    fn focus_loss_closes_menu() {
        let mut state = composing("/tra");
        sync_with_composer(&mut state);
        state.focused_panel = Panel::Transcript;
        sync_with_composer(&mut state);
        assert!(state.slash_menu.is_none());
        assert_eq!(state.arbiter.active(), None);
    }
}
