#[derive(Debug, Clone, PartialEq)]
pub struct HeaderState {
    pub session_text: String,
    pub stats_text: String,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self {
            session_text: " no session ".to_string(),
            stats_text: String::new(),
        }
    }
}
