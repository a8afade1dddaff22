use crate::app::{
    action::Action,
    command::Command,
    input::map_event_to_action,
    reducer,
    state::{AppMode, AppState},
    ui,
};
use crate::domain::commands::CommandStore;
use crate::domain::session::SessionStore;

use anyhow::Result;
use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use notify::{RecursiveMode, Watcher};
use ratatui::{backend::Backend, Terminal};
use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);
/// Editors fire bursts of fs events per save; one reload per burst.
const WATCH_DEBOUNCE: Duration = Duration::from_millis(500);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    session: Arc<dyn SessionStore>,
    commands: Arc<dyn CommandStore>,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, session, commands, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    session: Arc<dyn SessionStore>,
    commands: Arc<dyn CommandStore>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    // External edits to the transcript or the command store flow back in as
    // reload actions. The watchers stop when these bindings drop.
    let _session_watcher = watch_file(
        &session.path(),
        Action::SessionFileChanged,
        action_tx.clone(),
    )?;
    let _command_watcher = watch_file(
        &commands.path(),
        Action::CommandFileChanged,
        action_tx.clone(),
    )?;

    // Initial Load
    if app_state.mode != AppMode::NoSession {
        handle_command(
            Command::LoadSession,
            session.clone(),
            commands.clone(),
            action_tx.clone(),
        )?;
        handle_command(
            Command::LoadCommands,
            session.clone(),
            commands.clone(),
            action_tx.clone(),
        )?;
    }

    loop {
        // --- 1. Render ---
        let theme = app_state.theme.clone();
        terminal.draw(|f| {
            ui::draw(f, &mut app_state, &theme);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        let next_deadline = app_state.timers.next_deadline();
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // Tracked deadlines. One expiry per wakeup; anything else still
            // due re-fires this arm immediately.
            () = async {
                match next_deadline {
                    Some(at) => tokio::time::sleep_until(at.into()).await,
                    None => std::future::pending::<()>().await,
                }
            } => {
                app_state
                    .timers
                    .expired(Instant::now())
                    .into_iter()
                    .next()
                    .map(Action::TimerElapsed)
            }

            // User Input
            Some(res) = event_rx.recv() => {
                let event = match res {
                    Ok(e) => e,
                    Err(e) => return Err(e.into()),
                };
                let action = map_event_to_action(event.clone(), &app_state, terminal.size()?);
                if let Event::Mouse(mouse) = event {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        app_state.last_click_time = Some(Instant::now());
                        app_state.last_click_pos = Some((mouse.column, mouse.row));
                    }
                }
                action
            },

            // Async Results
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            if let Action::Quit = action {
                break;
            }

            let command = reducer::update(&mut app_state, action);

            if app_state.should_quit {
                break;
            }

            if let Some(cmd) = command {
                handle_command(cmd, session.clone(), commands.clone(), action_tx.clone())?;
            }
        }
    }

    Ok(())
}

/// Watch `path` for changes, reporting each debounced burst as `changed`.
/// Returns `None` when there is nothing to watch yet.
fn watch_file(
    path: &Path,
    changed: Action,
    action_tx: mpsc::Sender<Action>,
) -> Result<Option<notify::RecommendedWatcher>> {
    let Some(file_name) = path.file_name().map(OsString::from) else {
        return Ok(None);
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    if !dir.exists() {
        return Ok(None);
    }

    let (notify_tx, mut notify_rx) = mpsc::channel(1);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            if event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(file_name.as_os_str()))
            {
                let _ = notify_tx.try_send(());
            }
        }
    })?;
    // The parent directory, not the file: editors that save through a rename
    // replace the inode a direct file watch would stay pinned to.
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    tokio::spawn(async move {
        let mut pending = false;

        loop {
            if pending {
                tokio::select! {
                    Some(()) = notify_rx.recv() => {}
                    () = tokio::time::sleep(WATCH_DEBOUNCE) => {
                        if action_tx.send(changed.clone()).await.is_err() {
                            break;
                        }
                        pending = false;
                    }
                }
            } else if notify_rx.recv().await.is_some() {
                pending = true;
            } else {
                break;
            }
        }
    });

    Ok(Some(watcher))
}

pub(crate) fn handle_command(
    command: Command,
    session: Arc<dyn SessionStore>,
    commands: Arc<dyn CommandStore>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    crate::app::features::session::handle_command(command, session, commands, tx)
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
