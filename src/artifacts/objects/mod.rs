//! Content-addressed objects
//!
//! Every object is identified by the SHA-1 hash of its canonical encoding,
//! `<type> <size>\0<content>`:
//!
//! - **Blob**: raw file content, stored once in the content store
//! - **Commit**: a full path -> blob snapshot plus metadata, kept in the commit graph

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated id shown to users
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
