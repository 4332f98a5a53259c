use crate::LIT_DIR;
use crate::artifacts::objects::commit::Snapshot;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [LIT_DIR, ".", ".."];

/// The work tree the repository tracks
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List tracked-candidate files relative to the work tree root
    ///
    /// A directory expands to every file below it; a file lists itself.
    pub fn list_files(&self, root_file_path: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) => self.path.join(p),
            None => self.path.to_path_buf(),
        };

        if !root_file_path.exists() {
            anyhow::bail!("pathspec '{}' did not match any files", root_file_path.display());
        }

        let root_file_path = root_file_path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", root_file_path.display()))?;

        if self.is_metadata(&root_file_path) {
            anyhow::bail!(
                "pathspec '{}' is inside the repository metadata",
                root_file_path.display()
            );
        }

        if root_file_path.is_dir() {
            let mut files = WalkDir::new(&root_file_path)
                .into_iter()
                .filter_entry(|entry| !Self::is_ignored(entry.file_name().to_string_lossy().as_ref()))
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .filter_map(|entry| self.relative_path(entry.path()))
                .collect::<Vec<_>>();
            files.sort();

            Ok(files)
        } else {
            let relative = self.relative_path(&root_file_path).with_context(|| {
                format!("{} is outside the repository", root_file_path.display())
            })?;

            Ok(vec![relative])
        }
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let content = std::fs::read(self.path.join(file_path))
            .with_context(|| format!("Unable to read {}", file_path.display()))?;

        Ok(Bytes::from(content))
    }

    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }
        if path.is_dir() {
            std::fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove existing directory: {:?}", file_path))?;
        }

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    /// Delete a file, then any directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir == self.path.as_ref() || std::fs::remove_dir(dir).is_err() {
                break;
            }
            parent = dir.parent();
        }

        Ok(())
    }

    /// Paths tracked by `from` that `to` no longer tracks
    pub fn stale_paths<'s>(from: &'s Snapshot, to: &Snapshot) -> Vec<&'s Path> {
        from.keys()
            .filter(|path| !to.contains_key(*path))
            .map(PathBuf::as_path)
            .collect()
    }

    fn is_ignored(name: &str) -> bool {
        IGNORED_PATHS.contains(&name)
    }

    fn is_metadata(&self, path: &Path) -> bool {
        self.relative_path(path)
            .and_then(|relative| relative.components().next().map(|c| c.as_os_str() == LIT_DIR))
            .unwrap_or(false)
    }

    fn relative_path(&self, path: &Path) -> Option<PathBuf> {
        let root = self.path.canonicalize().ok()?;
        path.strip_prefix(&root).ok().map(PathBuf::from)
    }
}
