//! History traversal
//!
//! - `history`: lazy first-parent walk from a commit to the root

pub mod history;
