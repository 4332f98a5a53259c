use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Snapshot;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn checkout(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        if *self.graph().current_branch() == branch_name {
            writeln!(self.writer(), "Already on '{}'", branch_name)?;
            return Ok(());
        }

        let previous = self.head_snapshot();
        self.graph_mut().switch_branch(&branch_name)?;
        let target = self.head_snapshot();

        self.materialize(&previous, &target)?;
        self.staging_mut().clear();
        self.persist()?;

        writeln!(self.writer(), "Switched to branch '{}'", branch_name)?;

        Ok(())
    }

    pub(crate) fn head_snapshot(&self) -> Snapshot {
        self.graph()
            .head()
            .map(|commit| commit.snapshot().clone())
            .unwrap_or_default()
    }

    /// Make the work tree match `to`, given that it currently holds `from`
    ///
    /// Files tracked by `from` and absent from `to` are deleted; every file of
    /// `to` is written from the content store.
    pub(crate) fn materialize(&self, from: &Snapshot, to: &Snapshot) -> anyhow::Result<()> {
        for path in Workspace::stale_paths(from, to) {
            self.workspace().remove_file(path)?;
        }

        for (path, oid) in to {
            let data = self
                .store()
                .get(oid)
                .with_context(|| format!("Unable to restore {}", path.display()))?;
            self.workspace().write_file(path, &data)?;
        }

        Ok(())
    }
}
