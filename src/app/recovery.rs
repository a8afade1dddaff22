#[must_use]
pub fn get_suggestions(msg: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("no such file") || msg_lower.contains("not found") {
        suggestions.push(
            "Check the transcript path, or start with: riposte <transcript.md>".to_string(),
        );
    }

    if msg_lower.contains("permission denied") {
        suggestions.push("Check read/write permissions on the transcript file".to_string());
    }

    if msg_lower.contains("is a directory") {
        suggestions.push("Point riposte at a transcript file, not a directory".to_string());
    }

    if msg_lower.contains("toml") || msg_lower.contains("expected") {
        suggestions
            .push("Fix or delete ~/.config/riposte/commands.toml to restore defaults".to_string());
    }

    if msg_lower.contains("no space left") {
        suggestions.push("Free up disk space; drafts and messages cannot be saved".to_string());
    }

    suggestions
}
