use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(&mut self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let data = self.workspace().read_file(Path::new(object_path))?;
        let object_id = Blob::new(data.clone()).oid();

        if write {
            self.ensure_initialized()?;
            self.store().put(data)?;
        }

        write!(self.writer(), "{}", object_id)?;

        Ok(())
    }
}
