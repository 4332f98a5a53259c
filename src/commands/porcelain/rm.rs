use crate::areas::repository::Repository;
use std::io::Write;
use std::path::{Path, PathBuf};

impl Repository {
    /// Unstage `path` and drop its blob if nothing else needs it
    ///
    /// The working file is deleted too unless `cached` is set.
    pub fn rm(&mut self, path: &str, cached: bool) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = self.normalize_path(Path::new(path))?;
        let oid = self.staging_mut().unstage(&path)?;
        // the index must stop naming the blob before the blob can go
        self.persist()?;

        if !cached {
            self.workspace().remove_file(&path)?;
        }

        let still_needed = self.store().ref_count(&oid) > 0
            || self.staging().references(&oid, None);
        if !still_needed && self.store().contains(&oid) {
            self.store().remove(&oid)?;
        }

        writeln!(self.writer(), "rm '{}'", path.display())?;

        Ok(())
    }

    // accept both work-tree-relative and absolute spellings of a path
    fn normalize_path(&self, path: &Path) -> anyhow::Result<PathBuf> {
        if path.is_absolute() {
            let relative = path.strip_prefix(self.path()).map_err(|_| {
                anyhow::anyhow!("{} is outside the repository", path.display())
            })?;
            return Ok(relative.to_path_buf());
        }

        Ok(path.to_path_buf())
    }
}
