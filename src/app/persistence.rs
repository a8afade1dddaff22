use std::io;
use std::path::PathBuf;

/// Path of `name` under the app's config directory, `~/.config/riposte/`
/// unless `RIPOSTE_CONFIG_DIR` overrides it. `None` when no home directory
/// can be resolved.
pub fn config_file(name: &str) -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("RIPOSTE_CONFIG_DIR") {
        return Some(PathBuf::from(dir).join(name));
    }
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("riposte");
        path.push(name);
        path
    })
}

fn draft_path() -> Option<PathBuf> {
    config_file("draft.txt")
}

/// Restore an unsent draft from a previous run, if one was left behind.
/// Missing or unreadable files are simply no draft.
#[must_use]
pub fn load_draft() -> Option<String> {
    let path = draft_path()?;
    let text = std::fs::read_to_string(path).ok()?;
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Persist the composer text so a crash or accidental quit loses nothing.
/// With no home directory there is nowhere to save; that is not an error.
pub fn save_draft(text: &str) -> io::Result<()> {
    let Some(path) = draft_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)
}

/// Drop the saved draft after a successful submit.
pub fn clear_draft() {
    if let Some(path) = draft_path() {
        let _ = std::fs::remove_file(path);
    }
}
