//! Content-addressed blob storage
//!
//! Every blob is stored once, under the SHA-1 of its encoding, as a
//! zlib-compressed loose object at `.lit/objects/<2 hex>/<38 hex>`. Writing
//! the same bytes twice is a no-op.
//!
//! Next to the objects the store keeps a ledger of how many commit snapshots
//! reference each blob. Commits bump the count when they are created and drop
//! it when the pruning walk deletes them; `remove` refuses to delete a blob
//! whose count is still above zero, so no surviving commit can lose its content.

use crate::artifacts::core::error::{LitError, Missing, Protected, Result};
use crate::artifacts::core::state_file::{StateFile, write_atomically};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Signature of the ledger state file
const LEDGER_SIGNATURE: [u8; 4] = *b"LSTO";

/// Ledger state file format version
const LEDGER_VERSION: u32 = 1;

/// Snapshot reference counts per blob
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Ledger {
    refcounts: BTreeMap<ObjectId, u64>,
}

#[derive(Debug)]
pub struct ContentStore {
    /// Path to the objects directory (typically `.lit/objects`)
    path: Box<Path>,
    ledger_file: StateFile,
    ledger: Ledger,
    /// Flag indicating if the ledger has been modified since loading
    changed: bool,
}

impl ContentStore {
    /// Create a store over `path` with an empty ledger kept at `ledger_path`
    pub fn new(path: Box<Path>, ledger_path: Box<Path>) -> Self {
        ContentStore {
            path,
            ledger_file: StateFile::new(ledger_path, LEDGER_SIGNATURE, LEDGER_VERSION),
            ledger: Ledger::default(),
            changed: false,
        }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Load the reference ledger from disk
    pub fn rehydrate(&mut self) {
        self.ledger = self.ledger_file.load();
        self.changed = false;
    }

    /// Persist the reference ledger if it changed
    pub fn write_updates(&mut self) -> Result<()> {
        if !self.changed {
            return Ok(());
        }

        self.ledger_file.store(&self.ledger)?;
        self.changed = false;

        Ok(())
    }

    /// Store `content` and return its content hash
    ///
    /// Nothing is written if a blob with the same hash already exists.
    pub fn put(&self, content: impl Into<Bytes>) -> Result<ObjectId> {
        let blob = Blob::new(content.into());
        let oid = blob.oid();
        let object_path = self.object_path(&oid);

        if object_path.exists() {
            tracing::debug!(%oid, "blob already stored");
            return Ok(oid);
        }

        let compressed = Self::compress(&blob.encode())
            .map_err(|e| LitError::storage_io(object_path.clone(), e))?;
        write_atomically(&object_path, &compressed)?;
        tracing::debug!(%oid, size = blob.content().len(), "blob stored");

        Ok(oid)
    }

    /// Read back the bytes stored under `oid`
    pub fn get(&self, oid: &ObjectId) -> Result<Bytes> {
        let object_path = self.object_path(oid);

        let compressed = std::fs::read(&object_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LitError::NotFound(Missing::Blob(oid.clone())),
            _ => LitError::storage_io(object_path.clone(), e),
        })?;

        Self::decode(&compressed)
            .map(Blob::into_content)
            .map_err(|e| LitError::storage_io(object_path, e))
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).exists()
    }

    /// Delete the blob stored under `oid`
    ///
    /// Fails with `ProtectedState` while any commit snapshot still references it.
    pub fn remove(&self, oid: &ObjectId) -> Result<()> {
        let refs = self.ref_count(oid);
        if refs > 0 {
            return Err(LitError::ProtectedState(Protected::ReferencedBlob {
                oid: oid.clone(),
                refs,
            }));
        }

        let object_path = self.object_path(oid);
        std::fs::remove_file(&object_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LitError::NotFound(Missing::Blob(oid.clone())),
            _ => LitError::storage_io(object_path.clone(), e),
        })?;
        self.prune_empty_parent_dir(&object_path)?;
        tracing::debug!(%oid, "blob removed");

        Ok(())
    }

    /// Count one more reference for every entry of `snapshot`
    pub fn retain(&mut self, snapshot: &Snapshot) {
        for oid in snapshot.values() {
            *self.ledger.refcounts.entry(oid.clone()).or_default() += 1;
            self.changed = true;
        }
    }

    /// Drop one reference for every entry of `snapshot`
    pub fn release(&mut self, snapshot: &Snapshot) {
        for oid in snapshot.values() {
            if let Some(count) = self.ledger.refcounts.get_mut(oid) {
                *count = count.saturating_sub(1);
                self.changed = true;
                if *count == 0 {
                    self.ledger.refcounts.remove(oid);
                }
            }
        }
    }

    /// Rebuild the ledger from scratch out of the given snapshots
    pub fn recount<'s>(&mut self, snapshots: impl IntoIterator<Item = &'s Snapshot>) {
        self.ledger = Ledger::default();
        self.changed = true;
        for snapshot in snapshots {
            self.retain(snapshot);
        }
    }

    /// Number of commit snapshots referencing `oid`
    pub fn ref_count(&self, oid: &ObjectId) -> u64 {
        self.ledger.refcounts.get(oid).copied().unwrap_or(0)
    }

    pub fn has_references(&self) -> bool {
        !self.ledger.refcounts.is_empty()
    }

    /// Find all blobs whose id starts with the given prefix.
    ///
    /// For prefixes of 2+ characters only the matching fan-out directory is
    /// searched; shorter prefixes scan every directory. Multiple matches mean
    /// the prefix is ambiguous.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        if !ObjectId::is_valid_prefix(prefix) {
            return Ok(Vec::new());
        }
        let prefix = prefix.to_ascii_lowercase();

        let dirs = if prefix.len() >= 2 {
            vec![self.path.join(&prefix[..2])]
        } else {
            self.fan_out_dirs()?
        };

        let mut matches = Vec::new();
        for dir in dirs {
            matches.extend(
                self.list_dir(&dir)?
                    .into_iter()
                    .filter(|oid| oid.as_ref().starts_with(&prefix)),
            );
        }
        matches.sort();

        Ok(matches)
    }

    /// Every blob currently in the store
    pub fn ids(&self) -> Result<Vec<ObjectId>> {
        let mut ids = Vec::new();
        for dir in self.fan_out_dirs()? {
            ids.extend(self.list_dir(&dir)?);
        }
        ids.sort();

        Ok(ids)
    }

    fn fan_out_dirs(&self) -> Result<Vec<PathBuf>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let entries =
            std::fs::read_dir(&self.path).map_err(|e| LitError::storage_io(self.path.clone(), e))?;

        Ok(entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_dir()
                    && path
                        .file_name()
                        .map(|name| name.len() == 2)
                        .unwrap_or(false)
            })
            .collect())
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<ObjectId>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let dir_name = dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let entries = std::fs::read_dir(dir).map_err(|e| LitError::storage_io(dir, e))?;

        Ok(entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let file_name = entry.file_name();
                // temp files left by interrupted writes fail to parse and are skipped
                ObjectId::try_parse(format!("{}{}", dir_name, file_name.to_string_lossy())).ok()
            })
            .collect())
    }

    fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.path.join(oid.to_path())
    }

    fn prune_empty_parent_dir(&self, object_path: &Path) -> Result<()> {
        if let Some(parent) = object_path.parent()
            && parent != self.path.as_ref()
            && parent
                .read_dir()
                .map_err(|e| LitError::storage_io(parent, e))?
                .next()
                .is_none()
        {
            std::fs::remove_dir(parent).map_err(|e| LitError::storage_io(parent, e))?;
        }

        Ok(())
    }

    fn decode(compressed: &[u8]) -> std::io::Result<Blob> {
        let mut reader = Cursor::new(Self::decompress(compressed)?);

        let object_type = ObjectType::parse_object_type(&mut reader).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        if object_type != ObjectType::Blob {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("expected a blob, found a {object_type}"),
            ));
        }

        Blob::deserialize(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content)
    }
}
