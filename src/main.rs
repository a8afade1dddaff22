use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tracing_appender::non_blocking::WorkerGuard;

use riposte::app::{persistence, r#loop::run_loop, state::AppMode, state::AppState};
use riposte::domain::{commands::CommandStore, session::SessionStore};
use riposte::infrastructure::{FileCommandStore, FileSessionStore};
use riposte::theme::Theme;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

/// Log to a file under the config directory; stdout belongs to the UI.
fn init_tracing() {
    let Some(dir) = persistence::config_file("logs") else {
        return;
    };
    let appender = tracing_appender::rolling::daily(dir, "riposte.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("riposte=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();
    init_tracing();

    // Resolve everything fallible BEFORE terminal setup so a bad argument or
    // config does not leave the terminal in raw mode.
    let session_path = std::env::args().nth(1).map(|arg| {
        let path = PathBuf::from(arg);
        // An absolute path keeps the file watcher valid across chdir.
        std::fs::canonicalize(&path).unwrap_or(path)
    });

    let key_config = riposte::app::keymap::KeyConfig::load();
    let theme_choice = key_config.theme;
    let mut app_state = AppState::new(key_config);
    if let Some(palette) = theme_choice {
        app_state.palette_type = palette;
        app_state.theme = Theme::from_palette_type(palette);
    }

    match &session_path {
        Some(path) => {
            app_state.session_path = Some(path.clone());
            app_state.mode = AppMode::Loading;
        }
        None => {
            app_state.mode = AppMode::NoSession;
        }
    }

    if let Some(draft) = persistence::load_draft() {
        let caret = draft.len();
        app_state.composer.set_text(&draft, caret);
    }

    let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(
        session_path.unwrap_or_default(),
    ));
    let commands: Arc<dyn CommandStore> = Arc::new(FileCommandStore::new(
        persistence::config_file("commands.toml")
            .unwrap_or_else(|| PathBuf::from("commands.toml")),
    ));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, session, commands).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}
