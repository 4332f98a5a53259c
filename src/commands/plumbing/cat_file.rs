use crate::areas::repository::Repository;
use crate::artifacts::core::error::LitError;
use std::io::Write;

impl Repository {
    /// Print the blob stored under a full or abbreviated hash
    pub fn cat_file(&self, object_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut candidates = self.store().find_by_prefix(object_id)?;
        let object_id = match candidates.len() {
            0 => anyhow::bail!("no blob matches {}", object_id),
            1 => candidates.remove(0),
            _ => {
                return Err(LitError::AmbiguousId {
                    prefix: object_id.to_string(),
                    candidates,
                }
                .into());
            }
        };

        let content = self.store().get(&object_id)?;
        self.writer().write_all(&content)?;

        Ok(())
    }
}
