//! Whole-structure state files
//!
//! The content store ledger, the staging area and the commit graph are each
//! persisted as one file that is rewritten in full whenever a command
//! changes it.
//!
//! ## File Format
//!
//! ```text
//! Header (16 bytes):
//!   - Signature (4 bytes), e.g. "LIDX"
//!   - Version (4 bytes, big-endian)
//!   - Body length (8 bytes, big-endian)
//!
//! Body:
//!   - JSON encoding of the structure
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! A file that is missing or cannot be decoded is not an error: the caller gets
//! the structure's `Default` instead and a warning is logged.

use crate::artifacts::core::CHECKSUM_SIZE;
use crate::artifacts::core::error::{LitError, Result};
use anyhow::{Context, anyhow};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use fake::rand;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha1::{Digest, Sha1};
use std::io::{Cursor, Read, Write};
use std::path::Path;

/// Size of the state file header in bytes
pub const HEADER_SIZE: usize = 16;

/// Running SHA-1 over everything read from or written to a stream
#[derive(Debug)]
pub struct Checksum<F> {
    file: F,
    digest: Sha1,
}

impl<F> Checksum<F> {
    pub fn new(file: F) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
        }
    }

    pub fn into_inner(self) -> F {
        self.file
    }
}

impl<F: Read> Checksum<F> {
    pub fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.file
            .read_exact(&mut buffer)
            .map_err(|_| anyhow!("Unexpected end-of-file while reading state file"))?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    pub fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.file
            .read_exact(&mut expected_checksum)
            .context("State file is missing its checksum")?;

        let actual_checksum = self.digest.clone().finalize();

        if expected_checksum != actual_checksum.as_slice() {
            return Err(anyhow!("Checksum does not match value stored on disk"));
        }

        Ok(())
    }
}

impl<F: Write> Checksum<F> {
    pub fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.file.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub fn write_checksum(&mut self) -> std::io::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.file.write_all(checksum.as_slice())
    }
}

/// Location and framing of one persisted structure
#[derive(Debug, Clone)]
pub struct StateFile {
    path: Box<Path>,
    signature: [u8; 4],
    version: u32,
}

impl StateFile {
    pub fn new(path: Box<Path>, signature: [u8; 4], version: u32) -> Self {
        StateFile {
            path,
            signature,
            version,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the structure, falling back to `T::default()` on any failure
    pub fn load<T: DeserializeOwned + Default>(&self) -> T {
        match self.try_load() {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "state file absent, using empty state");
                T::default()
            }
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %format!("{error:#}"),
                    "state file unreadable, using empty state"
                );
                T::default()
            }
        }
    }

    fn try_load<T: DeserializeOwned>(&self) -> anyhow::Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read(&self.path)
            .with_context(|| format!("Unable to read state file {}", self.path.display()))?;
        let available = content
            .len()
            .checked_sub(HEADER_SIZE + CHECKSUM_SIZE)
            .ok_or_else(|| anyhow!("State file is too short"))?;
        let mut reader = Checksum::new(Cursor::new(content));

        let mut header = Cursor::new(reader.read(HEADER_SIZE)?);
        let mut signature = [0u8; 4];
        header.read_exact(&mut signature)?;
        if signature != self.signature {
            return Err(anyhow!("Invalid state file signature"));
        }

        let version = header.read_u32::<BigEndian>()?;
        if version != self.version {
            return Err(anyhow!("Unsupported state file version: {}", version));
        }

        let body_len = header.read_u64::<BigEndian>()?;
        if body_len != available as u64 {
            return Err(anyhow!(
                "State file body length {} does not match the {} bytes on disk",
                body_len,
                available
            ));
        }
        let body = reader.read(available)?;
        reader.verify()?;

        let value = serde_json::from_slice(&body).context("Unable to decode state file body")?;
        Ok(Some(value))
    }

    /// Encode `value` and atomically replace the file with it
    pub fn store<T: Serialize>(&self, value: &T) -> Result<()> {
        let content = self
            .encode(value)
            .map_err(|e| LitError::storage_io(self.path.clone(), e))?;

        write_atomically(&self.path, &content)
    }

    fn encode<T: Serialize>(&self, value: &T) -> std::io::Result<Vec<u8>> {
        let body = serde_json::to_vec(value)?;

        let mut header = Vec::with_capacity(HEADER_SIZE);
        header.extend_from_slice(&self.signature);
        header.write_u32::<BigEndian>(self.version)?;
        header.write_u64::<BigEndian>(body.len() as u64)?;

        let mut writer = Checksum::new(Vec::with_capacity(
            HEADER_SIZE + body.len() + CHECKSUM_SIZE,
        ));
        writer.write(&header)?;
        writer.write(&body)?;
        writer.write_checksum()?;

        Ok(writer.into_inner())
    }
}

/// Write `content` to a sibling temp file, then rename it over `path`
pub(crate) fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let temp_path = dir.join(format!("tmp-{}", rand::random::<u32>()));

    std::fs::create_dir_all(dir).map_err(|e| LitError::storage_io(dir, e))?;
    std::fs::write(&temp_path, content).map_err(|e| LitError::storage_io(&temp_path, e))?;
    std::fs::rename(&temp_path, path).map_err(|e| LitError::storage_io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        names: BTreeMap<String, u32>,
    }

    #[fixture]
    fn dir() -> TempDir {
        TempDir::new().unwrap()
    }

    fn state_file(dir: &TempDir) -> StateFile {
        StateFile::new(dir.path().join("state").into_boxed_path(), *b"TEST", 1)
    }

    fn sample() -> Sample {
        Sample {
            names: [("a".to_string(), 1), ("b".to_string(), 2)].into(),
        }
    }

    #[rstest]
    fn stored_state_loads_back(dir: TempDir) {
        let file = state_file(&dir);
        file.store(&sample()).unwrap();

        assert_eq!(file.load::<Sample>(), sample());
    }

    #[rstest]
    fn missing_file_loads_default(dir: TempDir) {
        assert_eq!(state_file(&dir).load::<Sample>(), Sample::default());
    }

    #[rstest]
    fn corrupted_body_loads_default(dir: TempDir) {
        let file = state_file(&dir);
        file.store(&sample()).unwrap();

        let mut content = std::fs::read(file.path()).unwrap();
        content[HEADER_SIZE + 2] ^= 0xff;
        std::fs::write(file.path(), content).unwrap();

        assert_eq!(file.load::<Sample>(), Sample::default());
    }

    #[rstest]
    fn other_signature_or_version_loads_default(dir: TempDir) {
        state_file(&dir).store(&sample()).unwrap();

        let other_signature = StateFile::new(dir.path().join("state").into_boxed_path(), *b"ELSE", 1);
        let other_version = StateFile::new(dir.path().join("state").into_boxed_path(), *b"TEST", 2);

        assert_eq!(other_signature.load::<Sample>(), Sample::default());
        assert_eq!(other_version.load::<Sample>(), Sample::default());
    }

    #[rstest]
    fn truncated_file_loads_default(dir: TempDir) {
        let file = state_file(&dir);
        file.store(&sample()).unwrap();

        let content = std::fs::read(file.path()).unwrap();
        std::fs::write(file.path(), &content[..content.len() - 5]).unwrap();

        assert_eq!(file.load::<Sample>(), Sample::default());
    }

    #[rstest]
    fn oversized_body_length_loads_default(dir: TempDir) {
        let file = state_file(&dir);

        let mut content = Vec::new();
        content.extend_from_slice(b"TEST");
        content.write_u32::<BigEndian>(1).unwrap();
        content.write_u64::<BigEndian>(u64::MAX).unwrap();
        content.extend_from_slice(b"{}");
        content.extend_from_slice(&[0u8; CHECKSUM_SIZE]);
        std::fs::write(file.path(), content).unwrap();

        assert_eq!(file.load::<Sample>(), Sample::default());
    }
}
