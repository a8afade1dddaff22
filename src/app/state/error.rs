use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoticeSeverity {
    Info,
    Warning,
    Error,
}

/// A surfaced problem or confirmation. Rendered as a banner over the
/// transcript's bottom edge, with the first suggestion when one gives the
/// user a way forward. Never blocks input.
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeState {
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub severity: NoticeSeverity,
    pub suggestions: Vec<String>,
}

impl NoticeState {
    #[must_use]
    pub fn error(message: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Local::now(),
            severity: NoticeSeverity::Error,
            suggestions,
        }
    }
}
