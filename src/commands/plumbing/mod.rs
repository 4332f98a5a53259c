//! Plumbing commands (low-level operations)
//!
//! Direct access to the content store, mostly for scripting and debugging.
//!
//! ## Commands
//!
//! - `hash-object`: Compute a blob id and optionally store the blob
//! - `cat-file`: Print a stored blob

pub mod cat_file;
pub mod hash_object;
