//! Shared utilities and types
//!
//! - `error`: typed outcomes of storage engine operations
//! - `state_file`: checksummed, versioned on-disk encoding of whole structures
//! - `PagerWriter`: `Write` adapter over the `minus` pager

pub mod error;
pub mod state_file;

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Wrapper that implements `Write` for the minus pager
///
/// Lets `log` output go through the pager when stdout is a terminal while the
/// commands keep writing to a plain `Box<dyn Write>`.
///
/// ## Usage
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// writeln!(writer, "Some long output...")?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
