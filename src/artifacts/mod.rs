//! Data structures and algorithms
//!
//! - `branch`: branch name validation
//! - `core`: errors, persisted state files, pager wrapper
//! - `log`: history traversal over the commit graph
//! - `objects`: content-addressed objects (blob, commit) and their ids
//! - `status`: work tree inspection against the staging area

pub mod branch;
pub mod core;
pub mod log;
pub mod objects;
pub mod status;
