//! Memory-mapped reader for zero-copy MAT-file access.
//!
//! The element walk in `rustymat-format` works directly on the mapped
//! region, so opening a multi-gigabyte capture costs one `mmap` call and
//! no read-ahead.

use memmap2::Mmap;
use std::fs;
use std::io;
use std::path::Path;

use crate::MatRead;

/// Read-only memory mapping of a MAT-file.
///
/// The mapping stays valid after the file handle used to create it is
/// dropped, so only the `Mmap` itself is held.
#[derive(Debug)]
pub struct MmapReader {
    mmap: Mmap,
}

impl MmapReader {
    /// Map the file at `path` read-only.
    ///
    /// # Safety
    ///
    /// The caller must ensure that no other process truncates or rewrites
    /// the file while the mapping is active.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = fs::File::open(path)?;
        // SAFETY: read-only mapping; concurrent external modification is the
        // caller's responsibility, as documented above.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { mmap })
    }

    /// The whole mapped file as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }

    /// Slice `len` bytes starting at `offset`, without copying.
    ///
    /// Returns `None` when the range does not fit in the mapping.
    pub fn read_at(&self, offset: usize, len: usize) -> Option<&[u8]> {
        let end = offset.checked_add(len)?;
        self.mmap.get(offset..end)
    }

    /// Mapped length in bytes.
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Returns `true` for an empty mapping.
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }
}

impl MatRead for MmapReader {
    fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }
}
