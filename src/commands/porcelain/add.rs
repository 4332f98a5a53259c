use crate::areas::repository::Repository;
use std::path::Path;

impl Repository {
    pub fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        // Expand every argument into the files below it
        let paths = paths
            .iter()
            .map(|path| self.workspace().list_files(Some(Path::new(path))))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        for path in paths {
            let data = self.workspace().read_file(&path)?;
            let oid = self.store().put(data)?;

            self.staging_mut().stage(path, oid);
        }

        self.persist()
    }
}
