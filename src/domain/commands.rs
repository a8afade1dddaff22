use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Placeholder token inside templates, replaced with the current selection
/// (or an empty string) when a command is committed.
pub const PLACEHOLDER: &str = "{text}";

/// Marker shown in dropdown previews when no selection exists.
pub const PREVIEW_MARKER: &str = "(selected text)";

static TRIGGER_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9]+$").unwrap());

/// Trailing `/fragment` before the caret: a slash followed by word
/// characters, anchored at the end of the text.
static SLASH_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/(\w*)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub trigger: String,
    pub template: String,
}

/// Ordered trigger → template table. Order is the file/definition order and
/// is observable: prefix matches keep it, so the first matching entry is the
/// initially selected dropdown row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl CommandTable {
    #[must_use]
    pub fn new(entries: Vec<CommandEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn get(&self, trigger: &str) -> Option<&CommandEntry> {
        let lower = trigger.to_lowercase();
        self.entries.iter().find(|e| e.trigger == lower)
    }

    /// All entries whose trigger starts with `fragment` (case-insensitive),
    /// in table order. An empty fragment matches nothing: the bare `/` does
    /// not open the menu.
    #[must_use]
    pub fn prefix_matches(&self, fragment: &str) -> Vec<usize> {
        if fragment.is_empty() {
            return Vec::new();
        }
        let lower = fragment.to_lowercase();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.trigger.starts_with(&lower))
            .map(|(i, _)| i)
            .collect()
    }

    /// Drop entries with malformed triggers, reporting what was skipped.
    /// Triggers are lowercase alphanumeric; anything else came from a
    /// hand-edited store file.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut skipped = Vec::new();
        self.entries.retain(|e| {
            if TRIGGER_SHAPE.is_match(&e.trigger) {
                true
            } else {
                skipped.push(e.trigger.clone());
                false
            }
        });
        skipped
    }
}

/// Expand a template, substituting every placeholder occurrence.
#[must_use]
pub fn expand_template(template: &str, selection: &str) -> String {
    template.replace(PLACEHOLDER, selection)
}

/// Preview line for a dropdown row: the expansion against the current
/// selection, or against a generic marker when nothing is selected.
#[must_use]
pub fn preview_template(template: &str, selection: Option<&str>) -> String {
    match selection {
        Some(text) if !text.is_empty() => expand_template(template, text),
        _ => expand_template(template, PREVIEW_MARKER),
    }
}

/// Locate the trailing slash fragment in `before_caret`. Returns the byte
/// index of the `/` and the fragment after it (possibly empty).
#[must_use]
pub fn slash_fragment(before_caret: &str) -> Option<(usize, &str)> {
    let caps = SLASH_TAIL.captures(before_caret)?;
    let whole = caps.get(0)?;
    let frag = caps.get(1)?;
    Some((whole.start(), frag.as_str()))
}

/// Built-in table seeded into a fresh store, mirroring the stock command
/// set users start from.
#[must_use]
pub fn default_table() -> CommandTable {
    let defaults = [
        ("translate", "Translate the following into English: {text}"),
        ("explain", "Explain this in simple terms: {text}"),
        ("improve", "Improve the wording of this text: {text}"),
        ("summarize", "Summarize the key points of: {text}"),
        ("code", "Write code for the following: {text}"),
        ("debug", "Find and fix the bug in this code: {text}"),
        ("review", "Review this and point out problems: {text}"),
        ("creative", "Rewrite this more creatively: {text}"),
    ];
    CommandTable::new(
        defaults
            .into_iter()
            .map(|(trigger, template)| CommandEntry {
                trigger: trigger.to_string(),
                template: template.to_string(),
            })
            .collect(),
    )
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandStore: Send + Sync {
    /// Load the table, seeding defaults on first run.
    async fn load(&self) -> Result<CommandTable>;

    async fn save(&self, table: &CommandTable) -> Result<()>;

    fn path(&self) -> std::path::PathBuf;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(names: &[&str]) -> CommandTable {
        CommandTable::new(
            names
                .iter()
                .map(|n| CommandEntry {
                    trigger: (*n).to_string(),
                    template: format!("{n}: {{text}}"),
                })
                .collect(),
        )
    }

    #[test]
    fn prefix_matches_keep_table_order() {
        let t = table(&["translate", "transform", "track", "explain"]);
        let m = t.prefix_matches("tra");
        assert_eq!(m, vec![0, 1, 2]);
    }

    #[test]
    fn prefix_matching_is_case_insensitive() {
        let t = table(&["translate"]);
        assert_eq!(t.prefix_matches("TRA"), vec![0]);
        assert!(t.get("TRANSLATE").is_some());
    }

    #[test]
    fn empty_fragment_matches_nothing() {
        let t = table(&["translate"]);
        assert!(t.prefix_matches("").is_empty());
    }

    #[test]
    fn slash_fragment_at_end_only() {
        assert_eq!(slash_fragment("hello /tra"), Some((6, "tra")));
        assert_eq!(slash_fragment("/"), Some((0, "")));
        assert_eq!(slash_fragment("a/b c"), None);
        assert_eq!(slash_fragment("no slash"), None);
    }

    #[test]
    fn slash_fragment_stops_at_word_boundary() {
        // A space after the fragment means the caret left the pattern.
        assert_eq!(slash_fragment("/tra "), None);
        assert_eq!(slash_fragment("x /tra\ny"), None);
    }

    #[test]
    fn expand_replaces_every_placeholder() {
        let out = expand_template("a {text} b {text}", "X");
        assert_eq!(out, "a X b X");
    }

    #[test]
    fn preview_uses_marker_without_selection() {
        assert_eq!(
            preview_template("Explain: {text}", None),
            "Explain: (selected text)"
        );
        assert_eq!(
            preview_template("Explain: {text}", Some("light")),
            "Explain: light"
        );
        assert_eq!(
            preview_template("Explain: {text}", Some("")),
            "Explain: (selected text)"
        );
    }

    #[test]
    fn sanitize_drops_malformed_triggers() {
        let mut t = table(&["good2", "Bad", "has space", "fine"]);
        let skipped = t.sanitize();
        assert_eq!(skipped, vec!["Bad".to_string(), "has space".to_string()]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn default_table_triggers_are_well_formed() {
        let mut t = default_table();
        assert_eq!(t.len(), 8);
        assert!(t.sanitize().is_empty());
        assert!(t.entries().iter().all(|e| e.template.contains(PLACEHOLDER)));
    }
}
