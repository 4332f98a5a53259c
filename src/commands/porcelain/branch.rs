use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create `branch_name` at the current head
    pub fn create_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        self.graph_mut().add_branch(branch_name)?;

        self.persist()
    }

    /// Delete `branch_name`, prune the commits only it reached and release
    /// their blob references
    pub fn delete_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let target = self
            .graph()
            .branch_target(&branch_name)
            .map(|oid| oid.to_short_oid());
        let pruned = self.graph_mut().delete_branch(&branch_name)?;
        for commit in &pruned {
            self.store_mut().release(commit.snapshot());
        }

        self.persist()?;

        writeln!(
            self.writer(),
            "Deleted branch {} (was {}).",
            branch_name,
            target.unwrap_or_default()
        )?;
        for commit in &pruned {
            writeln!(
                self.writer(),
                "Pruned commit {} {}",
                commit.id().to_short_oid(),
                commit.short_message()
            )?;
        }

        Ok(())
    }

    pub fn list_branches(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let current = self.graph().current_branch();
        for name in self.graph().branches().keys() {
            if name == current {
                writeln!(self.writer(), "* {}", name.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {}", name)?;
            }
        }

        Ok(())
    }
}
