#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadSession,
    LoadCommands,
    AppendUserMessage(String),
}
