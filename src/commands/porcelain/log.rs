use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Show the current branch's history, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for (position, commit) in self.graph().history().enumerate() {
            if position > 0 {
                writeln!(self.writer())?;
            }
            self.show_commit_medium(commit)?;
        }

        Ok(())
    }

    /// Show every commit in the repository, oldest first
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for (position, commit) in self.graph().commits().into_iter().enumerate() {
            if position > 0 {
                writeln!(self.writer())?;
            }
            self.show_commit_medium(commit)?;
        }

        Ok(())
    }

    fn show_commit_medium(&self, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{} {}{}",
            "commit".yellow(),
            commit.id().as_ref().yellow(),
            self.commit_decoration(commit)
        )?;
        writeln!(self.writer(), "Author: {}", commit.author().display_name())?;
        writeln!(self.writer(), "Date:   {}", commit.readable_timestamp())?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }

    fn commit_decoration(&self, commit: &Commit) -> String {
        let graph = self.graph();
        let names = graph.branches_at(commit.id());
        if names.is_empty() {
            return String::new();
        }

        let current = graph.current_branch();
        let names = names
            .into_iter()
            .map(|name| {
                if name == current {
                    format!("{} -> {}", "HEAD".cyan().bold(), name.as_ref().green().bold())
                } else {
                    name.as_ref().green().bold().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!(" ({})", names)
    }
}
