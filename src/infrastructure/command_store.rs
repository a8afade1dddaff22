//! TOML-backed slash command table. A fresh store is seeded with the
//! built-in commands so there is always a file for users to edit.

use crate::domain::commands::{default_table, CommandEntry, CommandStore, CommandTable};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct CommandFile {
    #[serde(default)]
    commands: Vec<CommandEntry>,
}

pub struct FileCommandStore {
    path: PathBuf,
}

impl FileCommandStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CommandStore for FileCommandStore {
    async fn load(&self) -> Result<CommandTable> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            let table = default_table();
            if let Err(e) = self.save(&table).await {
                tracing::warn!("could not seed command store: {e:#}");
            }
            return Ok(table);
        }

        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        let file: CommandFile = toml::from_str(&text)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(CommandTable::new(file.commands))
    }

    async fn save(&self, table: &CommandTable) -> Result<()> {
        let file = CommandFile {
            commands: table.entries().to_vec(),
        };
        let text = toml::to_string_pretty(&file)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, text)
            .await
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_load_seeds_the_default_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.toml");
        let store = FileCommandStore::new(path.clone());

        let table = store.load().await.unwrap();
        assert_eq!(table, default_table());
        assert!(path.exists());

        // The seeded file parses back to the same table.
        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded, table);
    }

    #[tokio::test]
    async fn loads_a_hand_written_file_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.toml");
        std::fs::write(
            &path,
            "[[commands]]\ntrigger = \"fix\"\ntemplate = \"Fix this: {text}\"\n\n\
             [[commands]]\ntrigger = \"ask\"\ntemplate = \"Question about {text}\"\n",
        )
        .unwrap();
        let store = FileCommandStore::new(path);

        let table = store.load().await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].trigger, "fix");
        assert_eq!(table.entries()[1].trigger, "ask");
    }

    #[tokio::test]
    async fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.toml");
        std::fs::write(&path, "[[commands]\ntrigger = ").unwrap();
        let store = FileCommandStore::new(path);

        let err = store.load().await.unwrap_err();
        assert!(err.to_string().contains("commands.toml"));
    }

    #[tokio::test]
    async fn save_round_trips_a_custom_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("commands.toml");
        let store = FileCommandStore::new(path);

        let table = CommandTable::new(vec![CommandEntry {
            trigger: "shorten".to_string(),
            template: "Shorten: {text}".to_string(),
        }]);
        store.save(&table).await.unwrap();

        assert_eq!(store.load().await.unwrap(), table);
    }
}
