//! Read-only memory-mapped file access.
//!
//! This module provides `MappedFile`, a scoped owner of a single read-only
//! mapping. The mapping is released exactly once, either explicitly through
//! `release` or implicitly when the value is dropped.

pub mod acquire;
pub mod error;

use crate::io::error::{OpenError, Result};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// The ways a caller may ask for a file to be opened.
///
/// Only `ReadExisting` can be mapped; every other mode is rejected with
/// `OpenError::UnsupportedMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenMode {
    #[default]
    ReadExisting,
    Create,
    Write,
    Append,
    Truncate,
}

/// A read-only mapping of one file into the process address space.
pub struct MappedFile {
    path: PathBuf,
    // None for empty files (memmap cannot map them) and after release.
    mmap: Option<Mmap>,
    len: u64,
    released: bool,
}

impl MappedFile {
    /// Opens an existing regular file for reading and maps it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, OpenMode::ReadExisting)
    }

    /// Opens a file with an explicit mode. Anything but `ReadExisting` fails.
    pub fn open_with<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        let _span = crate::span_trace!("map_file", path = %path.display()).entered();
        if mode != OpenMode::ReadExisting {
            warn!(path = %path.display(), ?mode, "Rejected unsupported open mode");
            return Err(OpenError::UnsupportedMode { mode });
        }

        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(OpenError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OpenError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(OpenError::StdIo(e)),
        }

        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        debug!(path = %path.display(), size = file_size, "Mapping file");

        if usize::try_from(file_size).is_err() {
            return Err(OpenError::Map {
                path: path.to_path_buf(),
                reason: format!("{file_size} bytes exceeds the addressable range"),
            });
        }

        let mmap = if file_size == 0 {
            None
        } else {
            // Safety: read-only map of a regular file; the map is never handed out mutably.
            let map = unsafe { Mmap::map(&file) }.map_err(|e| {
                warn!(path = %path.display(), error = %e, "Mapping failed");
                OpenError::Map {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            })?;
            if map.len() as u64 != file_size {
                warn!(
                    path = %path.display(),
                    expected = file_size,
                    mapped = map.len(),
                    "Mapped length differs from file length"
                );
                return Err(OpenError::Map {
                    path: path.to_path_buf(),
                    reason: format!("mapped {} of {} bytes", map.len(), file_size),
                });
            }
            Some(map)
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
            len: file_size,
            released: false,
        })
    }

    /// Path the mapping was created from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Length of the file in bytes, fixed at open time.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether a live mapping backs this value.
    pub fn is_mapped(&self) -> bool {
        self.mmap.is_some()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Start of the mapped region, or null for empty or released files.
    pub fn as_ptr(&self) -> *const u8 {
        match &self.mmap {
            Some(map) => map.as_ptr(),
            None => std::ptr::null(),
        }
    }

    /// The mapped bytes. Empty for empty or released files.
    pub fn bytes(&self) -> &[u8] {
        match &self.mmap {
            Some(map) => &map[..],
            None => &[],
        }
    }

    /// Copies bytes starting at `offset` into `buf`, returning how many were copied.
    ///
    /// Never reads past the end of the mapping; offsets at or beyond the end copy nothing.
    pub fn copy_to(&self, offset: u64, buf: &mut [u8]) -> usize {
        let data = self.bytes();
        let Ok(start) = usize::try_from(offset) else {
            return 0;
        };
        if start >= data.len() {
            return 0;
        }
        let n = std::cmp::min(buf.len(), data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        trace!(path = %self.path.display(), offset, len = n, "Copied from mapping");
        n
    }

    /// Unmaps the region. Calling this more than once does nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        // Dropping the map unmaps it; memmap2 discards unmap failures.
        if let Some(map) = self.mmap.take() {
            drop(map);
        }
        debug!(path = %self.path.display(), size = self.len, "Released mapping");
    }
}

impl Drop for MappedFile {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for MappedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedFile")
            .field("path", &self.path)
            .field("len", &self.len)
            .field("mapped", &self.is_mapped())
            .field("released", &self.released)
            .finish()
    }
}
