use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Point the current branch at the commit `revision` abbreviates and
    /// restore its snapshot
    pub fn reset(&mut self, revision: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target = self.graph().resolve(revision)?;
        let previous = self.head_snapshot();

        self.graph_mut().reset_to(&target)?;
        let snapshot = self.head_snapshot();

        self.materialize(&previous, &snapshot)?;
        self.staging_mut().clear();
        self.persist()?;

        let short_message = self
            .graph()
            .head()
            .map(|commit| commit.short_message())
            .unwrap_or_default();
        writeln!(
            self.writer(),
            "HEAD is now at {} {}",
            target.to_short_oid(),
            short_message
        )?;

        Ok(())
    }
}
