//! Core repository components
//!
//! - `content_store`: content-addressed blob storage with reference counts
//! - `staging`: the set of files the next commit will record
//! - `commit_graph`: commits, branches and the pruning walk
//! - `repository`: per-invocation context tying the above together
//! - `workspace`: work tree file system operations

pub mod commit_graph;
pub mod content_store;
pub mod repository;
pub mod staging;
pub mod workspace;
