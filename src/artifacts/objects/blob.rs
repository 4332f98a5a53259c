//! Blob object
//!
//! Blobs carry raw file bytes and nothing else; the path a blob lives at is
//! recorded by the staging area and by commit snapshots.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`, zlib-compressed

use crate::artifacts::objects::object::{Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }

    /// Canonical `blob <size>\0<content>` encoding
    pub fn encode(&self) -> Bytes {
        with_header(ObjectType::Blob, &self.content)
    }

    /// Content hash of the blob
    pub fn oid(&self) -> ObjectId {
        ObjectId::hash_of(&self.encode())
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::new(Bytes::from(content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_ids_match_git() {
        let blob = Blob::new(Bytes::from_static(b"hello\n"));
        assert_eq!(
            blob.oid().as_ref(),
            "ce013625030ba8dba906f756967f9e9ca394464a"
        );
    }

    #[test]
    fn serialized_blob_carries_header() {
        let blob = Blob::new(Bytes::from_static(b"abc"));
        assert_eq!(blob.encode().as_ref(), b"blob 3\0abc");
    }
}
