//! Command implementations
//!
//! - `plumbing`: Low-level commands over the content store (hash-object, cat-file)
//! - `porcelain`: User-facing version control workflows (add, commit, log, etc.)

pub mod plumbing;
pub mod porcelain;
