//! Work tree status
//!
//! Compares the work tree against the staged set and the head snapshot.
//!
//! - `file_change`: change categories and their labels
//! - `status_info`: the comparison itself

pub mod file_change;
pub mod status_info;
