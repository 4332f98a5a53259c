//! Commit graph
//!
//! Commits live in an id-indexed table; parent and child links are plain ids.
//! Branches are named pointers into that table and exactly one of them is
//! current. The graph is empty until the first commit, which becomes the root
//! and establishes the current branch.
//!
//! Persisted at `.lit/graph` as a state file by the repository.
//!
//! ## Pruning
//!
//! Deleting a branch removes the commits only that branch could reach. The
//! walk starts at the deleted branch's target and follows parents towards the
//! root. It stops at the first commit that is still the target of another
//! branch, or that has a child other than the commit the walk came from; that
//! commit survives and forgets the link to the pruned child. Every other
//! commit on the way is removed.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::{LitError, Missing, Protected, Result};
use crate::artifacts::log::history::History;
use crate::artifacts::objects::commit::{Author, Commit, Snapshot};
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitGraph {
    commits: BTreeMap<ObjectId, Commit>,
    branches: BTreeMap<BranchName, ObjectId>,
    current: BranchName,
    next_serial: u64,
    /// Flag indicating if the graph has been modified since loading
    #[serde(skip)]
    changed: bool,
}

impl CommitGraph {
    /// Record `snapshot` as a new commit on the current branch
    ///
    /// On an empty graph the commit becomes the root and the current branch is
    /// created pointing at it. Otherwise the snapshot must be non-empty and
    /// differ from the current head's, or `NoChanges` is returned and nothing
    /// is modified.
    pub fn create_commit(
        &mut self,
        message: String,
        author: Author,
        timestamp: DateTime<FixedOffset>,
        snapshot: Snapshot,
    ) -> Result<&Commit> {
        let parent = match self.head() {
            None => None,
            Some(head) => {
                if snapshot.is_empty() || head.snapshot() == &snapshot {
                    return Err(LitError::NoChanges);
                }
                Some(head.id().clone())
            }
        };

        let commit = Commit::new(
            self.next_serial,
            parent.clone(),
            author,
            timestamp,
            message,
            snapshot,
        );
        let oid = commit.id().clone();
        tracing::debug!(%oid, branch = %self.current, files = commit.snapshot().len(), "commit created");

        if let Some(parent) = parent.and_then(|parent| self.commits.get_mut(&parent)) {
            parent.add_child(oid.clone());
        }
        self.commits.insert(oid.clone(), commit);
        self.branches.insert(self.current.clone(), oid.clone());
        self.next_serial += 1;
        self.changed = true;

        Ok(&self.commits[&oid])
    }

    /// Create `name` pointing at the current head
    pub fn add_branch(&mut self, name: BranchName) -> Result<()> {
        if self.branches.contains_key(&name) {
            return Err(LitError::AlreadyExists(name));
        }
        let head = self
            .head_id()
            .cloned()
            .ok_or_else(|| LitError::NotFound(Missing::Branch(self.current.clone())))?;

        tracing::debug!(branch = %name, %head, "branch created");
        self.branches.insert(name, head);
        self.changed = true;

        Ok(())
    }

    /// Make `name` the current branch
    pub fn switch_branch(&mut self, name: &BranchName) -> Result<()> {
        if !self.branches.contains_key(name) {
            return Err(LitError::NotFound(Missing::Branch(name.clone())));
        }

        self.current = name.clone();
        self.changed = true;

        Ok(())
    }

    /// Point the current branch at `oid`
    pub fn reset_to(&mut self, oid: &ObjectId) -> Result<()> {
        if !self.commits.contains_key(oid) {
            return Err(LitError::NotFound(Missing::Commit(oid.to_string())));
        }

        tracing::debug!(branch = %self.current, target = %oid, "branch reset");
        self.branches.insert(self.current.clone(), oid.clone());
        self.changed = true;

        Ok(())
    }

    /// Remove `name` and prune the commits only it could reach
    ///
    /// Returns the pruned commits, nearest to the deleted target first.
    pub fn delete_branch(&mut self, name: &BranchName) -> Result<Vec<Commit>> {
        if *name == self.current {
            return Err(LitError::ProtectedState(Protected::CurrentBranch(
                name.clone(),
            )));
        }
        let target = self
            .branches
            .remove(name)
            .ok_or_else(|| LitError::NotFound(Missing::Branch(name.clone())))?;
        self.changed = true;

        let mut pruned = Vec::new();
        let mut came_from: Option<ObjectId> = None;
        let mut cursor = Some(target);

        while let Some(oid) = cursor.take() {
            let Some(commit) = self.commits.get_mut(&oid) else {
                break;
            };

            let is_branch_target = self.branches.values().any(|target| *target == oid);
            let has_other_children = commit
                .children()
                .iter()
                .any(|child| Some(child) != came_from.as_ref());
            if is_branch_target || has_other_children {
                if let Some(child) = &came_from {
                    commit.remove_child(child);
                }
                break;
            }

            if let Some(commit) = self.commits.remove(&oid) {
                cursor = commit.parent().cloned();
                came_from = Some(oid);
                pruned.push(commit);
            }
        }

        tracing::debug!(branch = %name, pruned = pruned.len(), "branch deleted");

        Ok(pruned)
    }

    /// Walk from the current head to the root
    pub fn history(&self) -> History<'_> {
        History::new(self, self.head_id().cloned())
    }

    /// Walk from `oid` to the root
    pub fn history_from(&self, oid: &ObjectId) -> Result<History<'_>> {
        if !self.commits.contains_key(oid) {
            return Err(LitError::NotFound(Missing::Commit(oid.to_string())));
        }

        Ok(History::new(self, Some(oid.clone())))
    }

    /// Every commit whose message is exactly `message`, in creation order
    pub fn find_by_message(&self, message: &str) -> Vec<&Commit> {
        let mut found = self
            .commits
            .values()
            .filter(|commit| commit.message() == message)
            .collect::<Vec<_>>();
        found.sort_by_key(|commit| commit.serial());

        found
    }

    /// Resolve a full or abbreviated commit id
    pub fn resolve(&self, prefix: &str) -> Result<ObjectId> {
        if !ObjectId::is_valid_prefix(prefix) {
            return Err(LitError::NotFound(Missing::Commit(prefix.to_string())));
        }
        let lowered = prefix.to_ascii_lowercase();

        let mut candidates = self
            .commits
            .keys()
            .filter(|oid| oid.as_ref().starts_with(&lowered))
            .cloned()
            .collect::<Vec<_>>();

        match candidates.len() {
            0 => Err(LitError::NotFound(Missing::Commit(prefix.to_string()))),
            1 => Ok(candidates.remove(0)),
            _ => Err(LitError::AmbiguousId {
                prefix: prefix.to_string(),
                candidates,
            }),
        }
    }

    pub fn head(&self) -> Option<&Commit> {
        self.head_id().and_then(|oid| self.commits.get(oid))
    }

    pub fn head_id(&self) -> Option<&ObjectId> {
        self.branches.get(&self.current)
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current
    }

    pub fn branches(&self) -> &BTreeMap<BranchName, ObjectId> {
        &self.branches
    }

    pub fn branch_target(&self, name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    /// Names of the branches pointing at `oid`
    pub fn branches_at(&self, oid: &ObjectId) -> Vec<&BranchName> {
        self.branches
            .iter()
            .filter(|(_, target)| *target == oid)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn commit(&self, oid: &ObjectId) -> Option<&Commit> {
        self.commits.get(oid)
    }

    /// All commits, in creation order
    pub fn commits(&self) -> Vec<&Commit> {
        let mut commits = self.commits.values().collect::<Vec<_>>();
        commits.sort_by_key(|commit| commit.serial());

        commits
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.changed = false;
    }
}
