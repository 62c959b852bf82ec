//! # Filesystem Service
//!
//! The attribute store never touches `std::fs` directly. Every primitive it needs
//! (stat, mkdir, rmdir, create, unlink, read, write, readdir) goes through the
//! [`FsService`] trait, so the storage policy can be exercised against an
//! in-memory tree in tests and against the real filesystem in production.
//!
//! ## Implementations
//!
//! - [`os::OsFs`]: Production backend over `std::fs`
//!   - Directory and file modes applied on Unix
//!   - Special files (sockets, fifos, devices) report as [`EntryType::Missing`]
//!
//! - [`memory::MemFs`]: In-memory backend for testing
//!   - No persistence
//!   - Listings include the `.` and `..` pseudo-entries, like `getdents`
//!   - Supports injected failures per operation
//!
//! Handles are closed by dropping them.

use crate::error::{AttrError, Result};
use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::Path;

pub mod memory;
pub mod os;

/// Self and parent pseudo-entries that directory listings may contain.
pub const PSEUDO_ENTRIES: [&str; 2] = [".", ".."];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Missing,
    File,
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub kind: EntryType,
    /// Size in bytes; zero for directories and missing entries.
    pub len: u64,
}

impl Stat {
    pub fn missing() -> Self {
        Self {
            kind: EntryType::Missing,
            len: 0,
        }
    }

    pub fn exists(&self) -> bool {
        self.kind != EntryType::Missing
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryType::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryType::File
    }
}

/// Outcome of [`FsService::remove_dir_if_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveDir {
    Removed,
    NotEmpty,
}

/// Abstract interface for the filesystem primitives used by the attribute store.
///
/// All methods take `&self`; backends that need mutation use interior mutability.
pub trait FsService {
    type Reader: Read;
    type Writer: Write;

    /// Existence and type of `path`. A missing path is not an error.
    fn stat(&self, path: &Path) -> Result<Stat>;

    fn create_dir(&self, path: &Path, mode: u32) -> Result<()>;

    /// Removes `path` only when it has no entries.
    /// Returns `Ok(RemoveDir::NotEmpty)` instead of failing when entries remain.
    fn remove_dir_if_empty(&self, path: &Path) -> Result<RemoveDir>;

    /// Creates `path` as an empty regular file, truncating it if it already exists.
    fn create_or_truncate_file(&self, path: &Path, mode: u32) -> Result<()>;

    /// Deletes a regular file. Fails with an `Io` error of kind `NotFound` when absent.
    fn delete_file(&self, path: &Path) -> Result<()>;

    fn open_read(&self, path: &Path) -> Result<Self::Reader>;

    /// Opens an existing file for writing from offset zero.
    fn open_write(&self, path: &Path) -> Result<Self::Writer>;

    /// Raw entry names of a directory, in unspecified order.
    /// May include the [`PSEUDO_ENTRIES`].
    fn list_dir(&self, path: &Path) -> Result<Vec<OsString>>;
}

/// True when `err` is an I/O error caused by the path not existing.
pub fn is_missing(err: &AttrError) -> bool {
    matches!(err, AttrError::Io(io) if io.kind() == std::io::ErrorKind::NotFound)
}

pub fn is_pseudo_entry(name: &str) -> bool {
    PSEUDO_ENTRIES.contains(&name)
}
