use crate::domain::models::Conversation;
use anyhow::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read and parse the whole transcript.
    async fn load(&self) -> Result<Conversation>;

    /// Append a user message to the transcript file. The file watcher picks
    /// up the change and triggers a reload, so this does not return the new
    /// conversation.
    async fn append_user_message(&self, text: &str) -> Result<()>;

    fn path(&self) -> std::path::PathBuf;
}
