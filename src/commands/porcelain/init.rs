use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Snapshot, load_timestamp_from_env};
use anyhow::Context;
use std::fs;
use std::io::Write;

const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            anyhow::bail!(
                "a lit repository already exists in {}",
                self.path().display()
            );
        }

        fs::create_dir_all(self.store().objects_path())
            .context("Failed to create .lit/objects directory")?;
        self.load()?;

        let author = Author::load_from_env();
        let timestamp = load_timestamp_from_env()?;
        let root = self
            .graph_mut()
            .create_commit(
                INITIAL_COMMIT_MESSAGE.to_string(),
                author,
                timestamp,
                Snapshot::new(),
            )
            .context("Failed to create the initial commit")?
            .id()
            .clone();
        tracing::debug!(%root, "repository initialized");

        self.persist()?;

        writeln!(
            self.writer(),
            "Initialized empty lit repository in {}",
            self.lit_path().display()
        )?;

        Ok(())
    }
}
