use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{IndexChangeType, WorkspaceChangeType};
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub type FileSet = BTreeSet<PathBuf>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    /// Staged paths compared against the head snapshot
    pub(crate) index_changeset: BTreeMap<PathBuf, IndexChangeType>,
    /// Staged or committed paths whose work tree file no longer matches
    pub(crate) workspace_changeset: BTreeMap<PathBuf, WorkspaceChangeType>,
    /// Work tree files neither staged nor in the head snapshot
    pub(crate) untracked_files: FileSet,
}

impl StatusInfo {
    pub fn index_changeset(&self) -> &BTreeMap<PathBuf, IndexChangeType> {
        &self.index_changeset
    }

    pub fn workspace_changeset(&self) -> &BTreeMap<PathBuf, WorkspaceChangeType> {
        &self.workspace_changeset
    }

    pub fn untracked_files(&self) -> &FileSet {
        &self.untracked_files
    }

    pub fn is_clean(&self) -> bool {
        self.index_changeset.is_empty()
            && self.workspace_changeset.is_empty()
            && self.untracked_files.is_empty()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let staged = self.repository.staging().snapshot();
        let head = self
            .repository
            .graph()
            .head()
            .map(|commit| commit.snapshot().clone())
            .unwrap_or_default();

        let mut workspace_files = BTreeMap::<PathBuf, ObjectId>::new();
        for path in self.repository.workspace().list_files(None)? {
            let oid = self.hash_file(&path)?;
            workspace_files.insert(path, oid);
        }

        let index_changeset = Self::compare_staged_with_head(&staged, &head);
        let workspace_changeset = Self::compare_workspace(&staged, &head, &workspace_files);
        let untracked_files = workspace_files
            .keys()
            .filter(|path| !staged.contains_key(*path) && !head.contains_key(*path))
            .cloned()
            .collect();

        Ok(StatusInfo {
            index_changeset,
            workspace_changeset,
            untracked_files,
        })
    }

    fn hash_file(&self, path: &Path) -> anyhow::Result<ObjectId> {
        let data = self.repository.workspace().read_file(path)?;
        Ok(Blob::new(data).oid())
    }

    fn compare_staged_with_head(
        staged: &Snapshot,
        head: &Snapshot,
    ) -> BTreeMap<PathBuf, IndexChangeType> {
        staged
            .iter()
            .map(|(path, oid)| {
                let change = match head.get(path) {
                    None => IndexChangeType::Added,
                    Some(committed) if committed != oid => IndexChangeType::Modified,
                    Some(_) => IndexChangeType::Unchanged,
                };
                (path.clone(), change)
            })
            .collect()
    }

    // staged content wins over committed content for paths present in both
    fn compare_workspace(
        staged: &Snapshot,
        head: &Snapshot,
        workspace_files: &BTreeMap<PathBuf, ObjectId>,
    ) -> BTreeMap<PathBuf, WorkspaceChangeType> {
        let mut tracked = head.clone();
        tracked.extend(staged.iter().map(|(path, oid)| (path.clone(), oid.clone())));

        tracked
            .into_iter()
            .filter_map(|(path, oid)| match workspace_files.get(&path) {
                None => Some((path, WorkspaceChangeType::Deleted)),
                Some(current) if *current != oid => Some((path, WorkspaceChangeType::Modified)),
                Some(_) => None,
            })
            .collect()
    }
}
