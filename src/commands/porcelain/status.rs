use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::FileChangeType;
use crate::artifacts::status::status_info::{Status, StatusInfo};
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let status = Status::new(self).initialize()?;

        writeln!(self.writer(), "On branch {}", self.graph().current_branch())?;
        self.print_changes(&status)?;

        if status.is_clean() {
            writeln!(self.writer(), "nothing to commit, working tree clean")?;
        }

        Ok(())
    }

    fn print_changes(&self, status: &StatusInfo) -> anyhow::Result<()> {
        if !status.index_changeset().is_empty() {
            writeln!(self.writer(), "\nChanges to be committed:")?;
            for (path, change) in status.index_changeset() {
                writeln!(
                    self.writer(),
                    "{}{}",
                    FileChangeType::Index(*change),
                    path.display().to_string().green()
                )?;
            }
        }

        if !status.workspace_changeset().is_empty() {
            writeln!(self.writer(), "\nChanges not staged for commit:")?;
            for (path, change) in status.workspace_changeset() {
                writeln!(
                    self.writer(),
                    "{}{}",
                    FileChangeType::Workspace(*change),
                    path.display().to_string().red()
                )?;
            }
        }

        if !status.untracked_files().is_empty() {
            writeln!(self.writer(), "\nUntracked files:")?;
            for path in status.untracked_files() {
                writeln!(self.writer(), "        {}", path.display().to_string().red())?;
            }
        }

        writeln!(self.writer())?;

        Ok(())
    }
}
