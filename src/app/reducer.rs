use super::{
    action::{Action, UpdateResult},
    command::Command,
    features,
    state::AppState,
};

/// Run an action through the feature chain, then let the overlay lifecycles
/// reconcile with whatever the features changed. First feature to handle an
/// action wins; observational features return NotHandled to pass it along.
pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    let command = match run_features(state, &action) {
        UpdateResult::Handled(command) => command,
        UpdateResult::NotHandled => None,
    };

    if affects_selection(&action) {
        features::follow_up::sync_selection(state);
    }
    if affects_composer(&action) {
        features::slash_menu::sync_with_composer(state);
    }

    command
}

fn run_features(state: &mut AppState, action: &Action) -> UpdateResult {
    match features::ui::update(state, action) {
        UpdateResult::NotHandled => {}
        handled => return handled,
    }
    match features::slash_menu::update(state, action) {
        UpdateResult::NotHandled => {}
        handled => return handled,
    }
    match features::follow_up::update(state, action) {
        UpdateResult::NotHandled => {}
        handled => return handled,
    }
    match features::transcript::update(state, action) {
        UpdateResult::NotHandled => {}
        handled => return handled,
    }
    features::composer::update(state, action)
}

/// Actions after which the transcript selection may differ from what the
/// follow-up overlay last saw.
fn affects_selection(action: &Action) -> bool {
    matches!(
        action,
        Action::PointerDown { .. }
            | Action::PointerDrag { .. }
            | Action::PointerUp { .. }
            | Action::SelectWord { .. }
            | Action::ExtendSelection(_)
            | Action::ClearSelection
            | Action::ScrollTranscript(_)
            | Action::Resize(..)
            | Action::SessionLoaded(_)
    )
}

/// Actions after which the composer text, caret, or command table may have
/// changed under the slash dropdown.
fn affects_composer(action: &Action) -> bool {
    matches!(
        action,
        Action::ComposerInput(_)
            | Action::ActivateFollowUp
            | Action::DraftSubmitted
            | Action::CommandsLoaded(_)
            | Action::Resize(..)
    )
}
