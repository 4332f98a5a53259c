//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository with its root commit
//! - `add`: Stage files for commit
//! - `rm`: Unstage a file and drop its blob when unreferenced
//! - `commit`: Record the staged set as a new commit
//! - `branch`: Create, list, or delete branches
//! - `checkout`: Switch branches and restore their files
//! - `reset`: Move the current branch to another commit
//! - `log`: Show commit history
//! - `find`: Look up commits by message
//! - `status`: Show working tree status

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod reset;
pub mod rm;
pub mod status;
