//! Staging area
//!
//! The set of `path -> content hash` pairs that the next commit will record.
//! The staged set *is* the next snapshot: whatever is staged when `commit`
//! runs becomes the commit's complete file tree, and the set is cleared
//! afterwards.
//!
//! Persisted at `.lit/index` as a state file (see `artifacts::core::state_file`).

use crate::artifacts::core::error::{LitError, Result};
use crate::artifacts::core::state_file::StateFile;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const INDEX_SIGNATURE: [u8; 4] = *b"LIDX";
const INDEX_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Entries {
    staged: Snapshot,
}

#[derive(Debug)]
pub struct StagingArea {
    file: StateFile,
    entries: Entries,
    /// Flag indicating if the staged set has been modified since loading
    changed: bool,
}

impl StagingArea {
    /// Create an empty staging area persisted at `path` (typically `.lit/index`)
    pub fn new(path: Box<Path>) -> Self {
        StagingArea {
            file: StateFile::new(path, INDEX_SIGNATURE, INDEX_VERSION),
            entries: Entries::default(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Load the staged set from disk, or start empty
    pub fn rehydrate(&mut self) {
        self.entries = self.file.load();
        self.changed = false;
    }

    /// Write the staged set back if it changed
    pub fn write_updates(&mut self) -> Result<()> {
        if !self.changed {
            return Ok(());
        }

        self.file.store(&self.entries)?;
        self.changed = false;

        Ok(())
    }

    /// Stage `path` at `oid`; a later call for the same path wins
    pub fn stage(&mut self, path: impl Into<PathBuf>, oid: ObjectId) {
        let path = path.into();
        tracing::debug!(path = %path.display(), %oid, "staged");

        self.entries.staged.insert(path, oid);
        self.changed = true;
    }

    /// Drop `path` from the staged set and return the hash it was staged at
    pub fn unstage(&mut self, path: &Path) -> Result<ObjectId> {
        let oid = self
            .entries
            .staged
            .remove(path)
            .ok_or_else(|| LitError::NotStaged(path.to_path_buf()))?;
        self.changed = true;

        Ok(oid)
    }

    /// Owned copy of the staged pairs, in path order
    pub fn entries(&self) -> Vec<(PathBuf, ObjectId)> {
        self.entries
            .staged
            .iter()
            .map(|(path, oid)| (path.clone(), oid.clone()))
            .collect()
    }

    pub fn get(&self, path: &Path) -> Option<&ObjectId> {
        self.entries.staged.get(path)
    }

    pub fn count(&self) -> usize {
        self.entries.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.staged.is_empty()
    }

    /// The staged set as a commit snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.entries.staged.clone()
    }

    /// Whether some staged path other than `except` points at `oid`
    pub fn references(&self, oid: &ObjectId, except: Option<&Path>) -> bool {
        self.entries
            .staged
            .iter()
            .any(|(path, staged)| staged == oid && Some(path.as_path()) != except)
    }

    pub fn clear(&mut self) {
        if !self.entries.staged.is_empty() {
            self.entries.staged.clear();
            self.changed = true;
        }
    }
}
