//! `lit` - a small local version-control engine
//!
//! The crate is split the same way the tool is used:
//!
//! - `areas`: the stateful parts of a repository (content store, staging area,
//!   commit graph, work tree) and the `Repository` context that owns them
//! - `artifacts`: value types and algorithms shared by the areas
//! - `commands`: user-facing operations implemented on top of `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use areas::repository::Repository;
pub use artifacts::core::error::{LitError, Missing, Protected};

/// Name of the metadata directory at the root of every work tree
pub const LIT_DIR: &str = ".lit";

/// Branch created together with the root commit
pub const DEFAULT_BRANCH: &str = "main";
