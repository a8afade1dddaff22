//! Markdown transcript file access. The file is the source of truth; this
//! store only parses it wholesale and appends to it, never rewrites.

use crate::domain::models::{Conversation, Message, SessionFormat, Speaker};
use crate::domain::session::SessionStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Conversation> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(parse_conversation(&text))
    }

    async fn append_user_message(&self, text: &str) -> Result<()> {
        let existing = tokio::fs::read_to_string(&self.path)
            .await
            .unwrap_or_default();
        let format = SessionFormat::detect(&existing);
        let chunk = message_chunk(&existing, format, text);

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("opening {}", self.path.display()))?;
        file.write_all(chunk.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }
}

fn parse_conversation(text: &str) -> Conversation {
    let format = SessionFormat::detect(text);
    let mut title = None;
    let mut messages: Vec<Message> = Vec::new();
    let mut current: Option<(Speaker, Vec<String>)> = None;

    for line in text.lines() {
        let trimmed = line.trim_start();

        // A top-level heading before any message names the conversation.
        if title.is_none() && messages.is_empty() && current.is_none() {
            if let Some(rest) = trimmed.strip_prefix("# ") {
                title = Some(rest.trim().to_string());
                continue;
            }
        }

        if let Some((speaker, rest)) = match_marker(format, trimmed) {
            if let Some((speaker, lines)) = current.take() {
                push_message(&mut messages, speaker, lines);
            }
            let mut lines = Vec::new();
            if !rest.is_empty() {
                lines.push(rest.to_string());
            }
            current = Some((speaker, lines));
        } else if let Some((_, lines)) = &mut current {
            lines.push(line.to_string());
        }
        // Prose before the first marker belongs to no speaker; drop it.
    }

    if let Some((speaker, lines)) = current.take() {
        push_message(&mut messages, speaker, lines);
    }

    Conversation { title, messages }
}

/// Match a speaker marker at the start of a line. The marker must end the
/// line or be followed by whitespace, so `## Yours` never reads as `## You`.
fn match_marker(format: SessionFormat, line: &str) -> Option<(Speaker, &str)> {
    for speaker in [Speaker::User, Speaker::Assistant] {
        let marker = format.marker_for(speaker);
        if let Some(rest) = line.strip_prefix(marker) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return Some((speaker, rest.trim()));
            }
        }
    }
    None
}

fn push_message(messages: &mut Vec<Message>, speaker: Speaker, mut lines: Vec<String>) {
    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    let body = lines.join("\n");
    // A bare marker is a message still being written; skip it until it has
    // content.
    if !body.is_empty() {
        messages.push(Message { speaker, body });
    }
}

/// Format one user message in the file's own flavor, with a separating
/// blank line. Heading markers sit on their own line; inline markers share
/// the first line of the body.
fn message_chunk(existing: &str, format: SessionFormat, text: &str) -> String {
    let marker = format.marker_for(Speaker::User);
    let mut chunk = String::new();
    if !existing.is_empty() && !existing.ends_with('\n') {
        chunk.push('\n');
    }
    if !existing.trim().is_empty() {
        chunk.push('\n');
    }
    if marker.starts_with('#') {
        chunk.push_str(marker);
        chunk.push_str("\n\n");
        chunk.push_str(text.trim_end());
    } else {
        chunk.push_str(marker);
        chunk.push(' ');
        chunk.push_str(text.trim_end());
    }
    chunk.push('\n');
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_chatmark_transcript() {
        let text = "# Planning\n\n**You:** hello there\n\n**Assistant:** general reply\nwith a second line\n";
        let conversation = parse_conversation(text);
        assert_eq!(conversation.title.as_deref(), Some("Planning"));
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[0].speaker, Speaker::User);
        assert_eq!(conversation.messages[0].body, "hello there");
        assert_eq!(
            conversation.messages[1].body,
            "general reply\nwith a second line"
        );
    }

    #[test]
    fn parses_heading_transcript() {
        let text = "## You\n\nwhat is rust\n\n## Assistant\n\na systems language\n";
        let conversation = parse_conversation(text);
        assert_eq!(conversation.title, None);
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[0].body, "what is rust");
        assert_eq!(conversation.messages[1].speaker, Speaker::Assistant);
    }

    #[test]
    fn marker_must_end_at_a_word_boundary() {
        let text = "## Yours truly\n\n## You\n\nreal message\n";
        let conversation = parse_conversation(text);
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].body, "real message");
    }

    #[test]
    fn preamble_and_bare_markers_are_dropped() {
        let text = "exported from somewhere\n\n**You:** hi\n\n**Assistant:**\n";
        let conversation = parse_conversation(text);
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].body, "hi");
    }

    #[tokio::test]
    async fn append_matches_the_detected_format() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "## Assistant\n\nfirst\n").unwrap();
        let store = FileSessionStore::new(file.path().to_path_buf());

        store.append_user_message("a question").await.unwrap();

        let conversation = store.load().await.unwrap();
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[1].speaker, Speaker::User);
        assert_eq!(conversation.messages[1].body, "a question");
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert!(text.contains("\n\n## You\n\na question\n"));
    }

    #[tokio::test]
    async fn append_to_empty_file_uses_the_primary_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.md");
        std::fs::write(&path, "").unwrap();
        let store = FileSessionStore::new(path.clone());

        store.append_user_message("hello").await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "**You:** hello\n"
        );
    }

    #[tokio::test]
    async fn load_missing_file_is_an_error() {
        let store = FileSessionStore::new(PathBuf::from("/nonexistent/session.md"));
        let err = store.load().await.unwrap_err();
        assert!(err.to_string().contains("session.md"));
    }
}
