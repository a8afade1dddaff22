//! Translates terminal events into [`Action`]s. All layout hit-testing for
//! the mouse lives here so the reducer never has to ask where things are.

use crate::app::action::{Action, PointerTarget};
use crate::app::state::{AppMode, AppState, Panel};
use crate::app::ui::{self, AppLayout};
use crate::components::overlays::first_visible_row;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Rect, Size};
use std::time::Instant;

const DOUBLE_CLICK_MS: u128 = 500;
const WHEEL_STEP: isize = 3;

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState,
    terminal_size: Size,
) -> Option<Action> {
    // Kitty-protocol terminals and Windows report key releases too; acting on
    // both press and release would double every keystroke.
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Release {
            return None;
        }
    }

    if let Event::Resize(w, h) = event {
        return Some(Action::Resize(w, h));
    }

    match app_state.mode {
        AppMode::Help => match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                    Some(Action::ToggleHelp)
                }
                _ => None,
            },
            _ => None,
        },
        AppMode::ThemeSelection => match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc => Some(Action::CancelMode),
                KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectThemeNext),
                KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectThemePrev),
                KeyCode::Enter => {
                    let selection = app_state.theme_selection.as_ref()?;
                    selection
                        .themes
                        .get(selection.selected_index)
                        .copied()
                        .map(Action::SwitchTheme)
                }
                _ => None,
            },
            _ => None,
        },
        AppMode::NoSession => match event {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        },
        AppMode::Loading => match event {
            // The load task owns the session until it reports back; all the
            // user can do meanwhile is leave.
            Event::Key(key) if key.code == KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        AppMode::Normal => match event {
            Event::Key(key) => map_key(key, app_state),
            Event::Mouse(mouse) => map_mouse(mouse, app_state, terminal_size),
            _ => None,
        },
    }
}

fn map_key(key: KeyEvent, app_state: &AppState) -> Option<Action> {
    // While the dropdown is open its navigation keys win over the textarea;
    // everything else still reaches the composer so the query keeps tracking
    // what the user types.
    if app_state.slash_menu.is_some() {
        match key.code {
            KeyCode::Up => return Some(Action::SlashSelectPrev),
            KeyCode::Down => return Some(Action::SlashSelectNext),
            KeyCode::Enter | KeyCode::Tab => return Some(Action::SlashCommit),
            KeyCode::Esc => return Some(Action::SlashClose),
            _ => {}
        }
    }

    match app_state.focused_panel {
        Panel::Composer => match key.code {
            KeyCode::Esc => Some(Action::FocusTranscript),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::SubmitDraft)
            }
            _ => Some(Action::ComposerInput(key)),
        },
        Panel::Transcript => app_state.keymap.get_action(key),
    }
}

/// What a pointer event landed on, in z-order: overlays first, panes after.
enum MouseHit {
    Pill,
    SlashRow(usize),
    /// Border or dead space of the dropdown. Swallowed so a sloppy click
    /// near a row neither commits nor clears the selection underneath.
    SlashChrome,
    Pane(PointerTarget),
}

fn map_mouse(mouse: MouseEvent, app_state: &AppState, terminal_size: Size) -> Option<Action> {
    let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
    let layout = ui::get_layout(area);
    let (col, row) = (mouse.column, mouse.row);
    let hit = hit_test(app_state, &layout, col, row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match hit {
            MouseHit::Pill => Some(Action::ActivateFollowUp),
            MouseHit::SlashRow(index) => Some(Action::SlashCommitEntry(index)),
            MouseHit::SlashChrome => None,
            MouseHit::Pane(target) => {
                if target == PointerTarget::Transcript && is_double_click(app_state, col, row) {
                    return Some(Action::SelectWord { x: col, y: row });
                }
                Some(Action::PointerDown {
                    x: col,
                    y: row,
                    target,
                })
            }
        },
        MouseEventKind::Down(MouseButton::Right) => match hit {
            MouseHit::Pane(PointerTarget::Transcript) => Some(Action::ClearSelection),
            _ => None,
        },
        MouseEventKind::Drag(MouseButton::Left) => Some(Action::PointerDrag { x: col, y: row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Action::PointerUp { x: col, y: row }),
        MouseEventKind::Moved => match hit {
            MouseHit::SlashRow(index) => Some(Action::SlashHover(index)),
            _ => Some(Action::PointerMoved { x: col, y: row }),
        },
        MouseEventKind::ScrollUp => match hit {
            MouseHit::SlashRow(_) | MouseHit::SlashChrome => Some(Action::SlashSelectPrev),
            MouseHit::Pane(PointerTarget::Transcript) => {
                Some(Action::ScrollTranscript(-WHEEL_STEP))
            }
            _ => None,
        },
        MouseEventKind::ScrollDown => match hit {
            MouseHit::SlashRow(_) | MouseHit::SlashChrome => Some(Action::SlashSelectNext),
            MouseHit::Pane(PointerTarget::Transcript) => Some(Action::ScrollTranscript(WHEEL_STEP)),
            _ => None,
        },
        _ => None,
    }
}

fn hit_test(app_state: &AppState, layout: &AppLayout, col: u16, row: u16) -> MouseHit {
    if let Some(overlay) = &app_state.follow_up.overlay {
        if contains(overlay.rect, col, row) {
            return MouseHit::Pill;
        }
    }

    if let Some(menu) = &app_state.slash_menu {
        if contains(menu.rect, col, row) {
            if inside_border(menu.rect, col, row) {
                let inner_height = menu.rect.height.saturating_sub(2);
                // Same window the dropdown renders, so clicks land on the
                // rows the user actually sees.
                let offset = first_visible_row(menu.selected_index, inner_height);
                let index = offset + (row - menu.rect.y - 1) as usize;
                if index < menu.matches.len() {
                    return MouseHit::SlashRow(index);
                }
            }
            return MouseHit::SlashChrome;
        }
    }

    if inside_border(layout.transcript, col, row) {
        return MouseHit::Pane(PointerTarget::Transcript);
    }
    if inside_border(layout.composer, col, row) {
        return MouseHit::Pane(PointerTarget::Composer);
    }
    MouseHit::Pane(PointerTarget::Chrome)
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// True when the cell sits strictly inside the area's one-cell border.
fn inside_border(area: Rect, col: u16, row: u16) -> bool {
    area.width > 2
        && area.height > 2
        && col > area.x
        && col < area.x + area.width - 1
        && row > area.y
        && row < area.y + area.height - 1
}

fn is_double_click(app_state: &AppState, col: u16, row: u16) -> bool {
    match app_state.last_click_time {
        Some(t) => {
            Instant::now().duration_since(t).as_millis() < DOUBLE_CLICK_MS
                && app_state.last_click_pos == Some((col, row))
        }
        None => false,
    }
}
