//! Typed outcomes returned at the storage engine boundary
//!
//! The content store, staging area and commit graph never panic or print on
//! expected failures; they return one of these kinds and let the caller decide
//! how to report it.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

/// Something that was looked up and is absent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Missing {
    #[error("commit {0}")]
    Commit(String),
    #[error("branch {0}")]
    Branch(BranchName),
    #[error("blob {0}")]
    Blob(ObjectId),
}

/// State that an operation refuses to destroy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Protected {
    #[error("branch {0} is currently checked out")]
    CurrentBranch(BranchName),
    #[error("blob {oid} is still referenced by {refs} commit snapshot(s)")]
    ReferencedBlob { oid: ObjectId, refs: u64 },
}

#[derive(Debug, Error)]
pub enum LitError {
    #[error("{0} not found")]
    NotFound(Missing),

    #[error("branch {0} already exists")]
    AlreadyExists(BranchName),

    #[error("nothing to commit: staged files are identical to the last commit")]
    NoChanges,

    #[error("{0}")]
    ProtectedState(Protected),

    #[error("{} is not staged", .0.display())]
    NotStaged(PathBuf),

    #[error("id prefix {prefix} is ambiguous ({} candidates)", .candidates.len())]
    AmbiguousId {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    #[error("storage I/O failure at {}", .path.display())]
    StorageIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LitError {
    pub fn storage_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LitError::StorageIo {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for storage engine operations
pub type Result<T> = std::result::Result<T, LitError>;
