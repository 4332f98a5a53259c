//! Commit object
//!
//! A commit records the *complete* file tree at one point in time (a snapshot,
//! not a delta) together with its author, timestamp, message and parent link.
//! Commits are immutable once created; the only thing the commit graph keeps
//! up to date on them is the set of child ids.
//!
//! ## Canonical encoding
//!
//! The commit id is the SHA-1 of:
//! ```text
//! commit <size>\0
//! serial <n>
//! parent <parent-sha>            (absent for the root)
//! author <name> <email> <timestamp> <timezone>
//! file <blob-sha> <path>         (one line per snapshot entry, path order)
//!
//! <commit message>
//! ```
//!
//! `serial` is assigned by the commit graph and is unique within it, so two
//! commits with the same parent, snapshot, author, time and message still get
//! distinct ids.

use crate::artifacts::objects::object::with_header;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Full path -> content hash state of the tracked tree
pub type Snapshot = BTreeMap<PathBuf, ObjectId>;

/// Author information
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Author {
    name: String,
    email: String,
}

impl Author {
    pub fn new(name: String, email: String) -> Self {
        Author { name, email }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Format author name and email for display
    ///
    /// # Returns
    ///
    /// String in format "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Load author information from environment variables
    ///
    /// Reads `LIT_AUTHOR_NAME` (falling back to `USER`) and `LIT_AUTHOR_EMAIL`
    /// (falling back to `<name>@localhost`).
    pub fn load_from_env() -> Self {
        let name = std::env::var("LIT_AUTHOR_NAME")
            .or_else(|_| std::env::var("USER"))
            .unwrap_or_else(|_| "unknown".to_string());
        let email =
            std::env::var("LIT_AUTHOR_EMAIL").unwrap_or_else(|_| format!("{name}@localhost"));

        Author::new(name, email)
    }
}

/// Commit timestamp from `LIT_AUTHOR_DATE`, or the current local time
///
/// Accepts RFC 2822 or `%Y-%m-%d %H:%M:%S %z`.
pub fn load_timestamp_from_env() -> anyhow::Result<DateTime<FixedOffset>> {
    match std::env::var("LIT_AUTHOR_DATE") {
        Ok(date_str) => DateTime::parse_from_rfc2822(&date_str)
            .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
            .with_context(|| format!("LIT_AUTHOR_DATE is not a valid date: {date_str}")),
        Err(_) => Ok(chrono::Local::now().fixed_offset()),
    }
}

/// Commit node
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    id: ObjectId,
    serial: u64,
    parent: Option<ObjectId>,
    author: Author,
    timestamp: DateTime<FixedOffset>,
    message: String,
    snapshot: Snapshot,
    children: BTreeSet<ObjectId>,
}

impl Commit {
    /// Create a commit and derive its id from the canonical encoding
    pub fn new(
        serial: u64,
        parent: Option<ObjectId>,
        author: Author,
        timestamp: DateTime<FixedOffset>,
        message: String,
        snapshot: Snapshot,
    ) -> Self {
        let mut commit = Commit {
            // placeholder until the encoding is hashed below
            id: ObjectId::hash_of(&[]),
            serial,
            parent,
            author,
            timestamp,
            message,
            snapshot,
            children: BTreeSet::new(),
        };
        commit.id = ObjectId::hash_of(&commit.encode());

        commit
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Get the full commit message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn children(&self) -> &BTreeSet<ObjectId> {
        &self.children
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub(crate) fn add_child(&mut self, child: ObjectId) {
        self.children.insert(child);
    }

    pub(crate) fn remove_child(&mut self, child: &ObjectId) -> bool {
        self.children.remove(child)
    }

    fn encode(&self) -> Bytes {
        let mut lines = vec![format!("serial {}", self.serial)];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!(
            "author {} {} {}",
            self.author.display_name(),
            self.timestamp.timestamp_nanos_opt().unwrap_or_default(),
            self.timestamp.format("%z")
        ));
        for (path, oid) in &self.snapshot {
            lines.push(format!("file {} {}", oid, path.to_string_lossy()));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        with_header(ObjectType::Commit, lines.join("\n").as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn author() -> Author {
        Author::new("Ada".to_string(), "ada@example.com".to_string())
    }

    #[fixture]
    fn timestamp() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-01T12:00:00+02:00").unwrap()
    }

    fn snapshot(entries: &[(&str, &[u8])]) -> Snapshot {
        entries
            .iter()
            .map(|(path, content)| (PathBuf::from(path), ObjectId::hash_of(content)))
            .collect()
    }

    #[rstest]
    fn id_is_stable_for_identical_metadata(author: Author, timestamp: DateTime<FixedOffset>) {
        let a = Commit::new(0, None, author.clone(), timestamp, "m".into(), Snapshot::new());
        let b = Commit::new(0, None, author, timestamp, "m".into(), Snapshot::new());

        assert_eq!(a.id(), b.id());
        assert_eq!(*a.id(), ObjectId::hash_of(&a.encode()));
    }

    #[rstest]
    fn serial_distinguishes_otherwise_identical_commits(
        author: Author,
        timestamp: DateTime<FixedOffset>,
    ) {
        let files = snapshot(&[("a.txt", b"one")]);
        let a = Commit::new(1, None, author.clone(), timestamp, "m".into(), files.clone());
        let b = Commit::new(2, None, author, timestamp, "m".into(), files);

        assert_ne!(a.id(), b.id());
    }

    #[rstest]
    fn snapshot_is_part_of_the_id(author: Author, timestamp: DateTime<FixedOffset>) {
        let a = Commit::new(1, None, author.clone(), timestamp, "m".into(), snapshot(&[("a", b"1")]));
        let b = Commit::new(1, None, author, timestamp, "m".into(), snapshot(&[("a", b"2")]));

        assert_ne!(a.id(), b.id());
    }

    #[rstest]
    fn serde_round_trip_preserves_commit(author: Author, timestamp: DateTime<FixedOffset>) {
        let mut commit = Commit::new(
            3,
            Some(ObjectId::hash_of(b"parent")),
            author,
            timestamp,
            "first line\nsecond line".into(),
            snapshot(&[("dir/b.txt", b"b"), ("a.txt", b"a")]),
        );
        commit.add_child(ObjectId::hash_of(b"child"));

        let json = serde_json::to_string(&commit).unwrap();
        let restored: Commit = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, commit);
        assert_eq!(restored.short_message(), "first line");
    }

    #[rstest]
    fn readable_timestamp_keeps_offset(author: Author, timestamp: DateTime<FixedOffset>) {
        let commit = Commit::new(0, None, author, timestamp, "m".into(), Snapshot::new());
        assert_eq!(commit.readable_timestamp(), "Mon Jan 1 12:00:00 2024 +0200");
    }
}
