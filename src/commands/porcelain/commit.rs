use crate::areas::repository::Repository;
use crate::artifacts::core::error::LitError;
use crate::artifacts::objects::commit::{Author, load_timestamp_from_env};
use std::io::Write;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let author = Author::load_from_env();
        let timestamp = load_timestamp_from_env()?;
        let message = message.trim().to_string();
        let snapshot = self.staging().snapshot();

        let commit = match self
            .graph_mut()
            .create_commit(message, author, timestamp, snapshot)
        {
            Ok(commit) => commit.clone(),
            Err(LitError::NoChanges) => {
                anyhow::bail!("nothing to commit, stage files with `lit add` first")
            }
            Err(error) => return Err(error.into()),
        };

        self.store_mut().retain(commit.snapshot());
        self.staging_mut().clear();
        self.persist()?;

        write!(
            self.writer(),
            "[{} {}] {}",
            self.graph().current_branch(),
            commit.id().to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
