use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the id of every commit whose message is exactly `message`
    ///
    /// Prints nothing when no commit matches.
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for commit in self.graph().find_by_message(message) {
            writeln!(self.writer(), "{}", commit.id())?;
        }

        Ok(())
    }
}
