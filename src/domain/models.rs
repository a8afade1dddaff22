use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "You"),
            Speaker::Assistant => write!(f, "Assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub speaker: Speaker,
    /// Body text with the speaker marker stripped. May span many lines.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conversation {
    pub title: Option<String>,
    pub messages: Vec<Message>,
}

impl Conversation {
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// One recognized transcript flavor. Export formats differ only in marker
/// strings, so each flavor is a row of data here rather than a parser fork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFormat {
    pub name: &'static str,
    pub user_marker: &'static str,
    pub assistant_marker: &'static str,
}

/// Known formats, probed in order. The first whose markers appear in the
/// file wins; the first entry doubles as the format for newly written
/// messages.
pub const SESSION_FORMATS: &[SessionFormat] = &[
    SessionFormat {
        name: "chatmark",
        user_marker: "**You:**",
        assistant_marker: "**Assistant:**",
    },
    SessionFormat {
        name: "heading",
        user_marker: "## You",
        assistant_marker: "## Assistant",
    },
];

impl SessionFormat {
    #[must_use]
    pub fn marker_for(&self, speaker: Speaker) -> &'static str {
        match speaker {
            Speaker::User => self.user_marker,
            Speaker::Assistant => self.assistant_marker,
        }
    }

    /// Pick the format matching `text`, defaulting to the primary one.
    #[must_use]
    pub fn detect(text: &str) -> SessionFormat {
        for fmt in SESSION_FORMATS {
            if text.lines().any(|l| {
                let l = l.trim_start();
                l.starts_with(fmt.user_marker) || l.starts_with(fmt.assistant_marker)
            }) {
                return *fmt;
            }
        }
        SESSION_FORMATS[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_heading_format() {
        let text = "# Notes\n\n## Assistant\nhello\n";
        assert_eq!(SessionFormat::detect(text).name, "heading");
    }

    #[test]
    fn defaults_to_primary_format() {
        assert_eq!(SessionFormat::detect("free text, no markers").name, "chatmark");
    }
}
