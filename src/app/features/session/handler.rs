use crate::app::{action::Action, command::Command};
use crate::domain::commands::CommandStore;
use crate::domain::session::SessionStore;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Run a command's I/O off the render loop, reporting back as actions.
pub fn handle_command(
    command: Command,
    session: Arc<dyn SessionStore>,
    commands: Arc<dyn CommandStore>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::LoadSession => {
            tokio::spawn(async move {
                match session.load().await {
                    Ok(conversation) => {
                        let _ = tx
                            .send(Action::SessionLoaded(Box::new(conversation)))
                            .await;
                    }
                    Err(e) => {
                        let _ = tx.send(Action::SessionLoadFailed(format!("{e}"))).await;
                    }
                }
            });
        }
        Command::LoadCommands => {
            tokio::spawn(async move {
                match commands.load().await {
                    Ok(mut table) => {
                        for trigger in table.sanitize() {
                            tracing::warn!("dropping malformed command entry: {trigger:?}");
                        }
                        let _ = tx.send(Action::CommandsLoaded(table)).await;
                    }
                    Err(e) => {
                        let _ = tx.send(Action::CommandsLoadFailed(format!("{e}"))).await;
                    }
                }
            });
        }
        Command::AppendUserMessage(text) => {
            tokio::spawn(async move {
                let _ = tx
                    .send(Action::OperationStarted("Sending...".to_string()))
                    .await;
                match session.append_user_message(&text).await {
                    Ok(()) => {
                        // The file watcher picks up the write and triggers
                        // the actual reload.
                        let _ = tx.send(Action::DraftSubmitted).await;
                        let _ = tx
                            .send(Action::OperationCompleted(Ok(
                                "Message appended".to_string()
                            )))
                            .await;
                    }
                    Err(e) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Err(format!("{e}"))))
                            .await;
                    }
                }
            });
        }
    }
    Ok(())
}
