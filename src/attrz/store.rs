//! # Attribute Store
//!
//! The storage policy for attributes, written against [`FsService`] only.
//!
//! ## Layout
//!
//! Each attributed target gets one hidden sibling directory (see
//! [`crate::resolver`]) holding one regular file per attribute. A file's name is
//! the attribute name and its full content is the raw value.
//!
//! ## Lifecycle
//!
//! - The attribute directory is created by the first [`AttributeStore::set`].
//! - It is removed by [`AttributeStore::remove`] once its last file is gone, and
//!   always by [`AttributeStore::remove_all`].
//! - Its existence therefore means "this target has attributes". An empty
//!   attribute directory can only appear from outside interference or an
//!   interrupted removal, and is handled: it lists as empty and `remove_all`
//!   cleans it up.
//!
//! ## Concurrency
//!
//! There is no locking. Each operation is a blocking sequence of filesystem
//! calls, and two operations on the same target may interleave between an
//! existence check and the action that follows it (a `set` racing a
//! `remove_all` can lose the new value or leave the directory behind). Callers
//! that need atomicity must serialize operations per target themselves.
//!
//! ## Failure model
//!
//! Nothing is rolled back. `set` deletes and recreates the attribute file, so a
//! failed write leaves a partially written value behind. A failed `remove_all`
//! leaves the attributes it had not yet reached.

use crate::config::Limits;
use crate::error::{AttrError, Missing, Result};
use crate::fs::{is_missing, is_pseudo_entry, FsService, RemoveDir};
use crate::names::AttrNames;
use crate::resolver::{attr_dir_owner, attr_dir_path, attr_file_path, validate_name};
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of copying a stored value into a caller buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Bytes written into the buffer.
    pub copied: usize,
    /// Size of the stored value.
    pub stored: usize,
}

impl Transfer {
    pub fn is_truncated(&self) -> bool {
        self.copied < self.stored
    }

    /// Turns a truncated transfer into [`AttrError::Truncated`].
    pub fn into_result(self) -> Result<usize> {
        if self.is_truncated() {
            Err(AttrError::Truncated {
                copied: self.copied,
                stored: self.stored,
            })
        } else {
            Ok(self.copied)
        }
    }
}

pub struct AttributeStore<F: FsService> {
    fs: F,
    limits: Limits,
}

impl<F: FsService> AttributeStore<F> {
    pub fn new(fs: F) -> Self {
        Self::with_limits(fs, Limits::default())
    }

    pub fn with_limits(fs: F, limits: Limits) -> Self {
        Self { fs, limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Stores `value` under `name`, replacing any previous value.
    ///
    /// Creates the attribute directory on first use. Returns the number of bytes written.
    pub fn set(&self, target: &Path, name: &str, value: &[u8]) -> Result<usize> {
        validate_name(name, &self.limits)?;
        if value.len() > self.limits.max_value_size {
            return Err(AttrError::SizeExceeded {
                size: value.len(),
                max: self.limits.max_value_size,
            });
        }
        let dir = attr_dir_path(target, &self.limits)?;
        let file = attr_file_path(&dir, name, &self.limits)?;
        self.require_target(target)?;

        let dir_stat = self.fs.stat(&dir)?;
        if !dir_stat.exists() {
            self.fs.create_dir(&dir, self.limits.dir_mode)?;
            debug!(dir = %dir.display(), "created attribute directory");
        } else if !dir_stat.is_dir() {
            return Err(AttrError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", dir.display()),
            )));
        }

        // Unlink first so the new value never inherits anything from the old file.
        match self.fs.delete_file(&file) {
            Ok(()) => debug!(file = %file.display(), "replacing attribute"),
            Err(e) if is_missing(&e) => {}
            Err(e) => return Err(e),
        }
        self.fs
            .create_or_truncate_file(&file, self.limits.file_mode)?;

        let mut writer = self.fs.open_write(&file)?;
        writer.write_all(value).map_err(AttrError::Io)?;
        writer.flush().map_err(AttrError::Io)?;
        drop(writer);

        debug!(file = %file.display(), bytes = value.len(), "attribute written");
        Ok(value.len())
    }

    /// Reads the full value of `name`.
    pub fn get(&self, target: &Path, name: &str) -> Result<Vec<u8>> {
        let (_, file, stored) = self.require_attr_file(target, name)?;
        let mut reader = self.fs.open_read(&file)?;
        let mut value = Vec::with_capacity(stored);
        reader.read_to_end(&mut value).map_err(AttrError::Io)?;
        Ok(value)
    }

    /// Copies the value of `name` into `buf`, up to `buf.len()` bytes.
    ///
    /// A short buffer is not an error: the returned [`Transfer`] reports both the
    /// bytes copied and the stored size.
    pub fn get_into(&self, target: &Path, name: &str, buf: &mut [u8]) -> Result<Transfer> {
        let (_, file, stored) = self.require_attr_file(target, name)?;
        let mut reader = self.fs.open_read(&file)?;
        let copied = read_up_to(&mut reader, buf).map_err(AttrError::Io)?;
        // The file may have changed size since the stat; trust what was read when
        // it came up short, and the stat otherwise.
        let stored = if copied < buf.len() { copied } else { stored.max(copied) };
        Ok(Transfer { copied, stored })
    }

    /// Names of all attributes on `target`, in unspecified order.
    pub fn list_names(&self, target: &Path) -> Result<AttrNames> {
        let dir = self.require_attr_dir(target)?;
        self.read_names(&dir)
    }

    /// Copies the delimiter-joined listing into `buf`, truncated to its length.
    ///
    /// Returns the logical length of the full listing, so a result larger than
    /// `buf.len()` tells the caller to retry with a bigger buffer.
    pub fn list_names_into(&self, target: &Path, buf: &mut [u8]) -> Result<usize> {
        let names = self.list_names(target)?;
        Ok(names.copy_into(buf))
    }

    /// Removes one attribute, and the attribute directory if it was the last one.
    pub fn remove(&self, target: &Path, name: &str) -> Result<()> {
        let (dir, file, _) = self.require_attr_file(target, name)?;
        match self.fs.delete_file(&file) {
            Ok(()) => {}
            Err(e) if is_missing(&e) => {
                return Err(AttrError::not_found(Missing::Attribute, file));
            }
            Err(e) => return Err(e),
        }
        debug!(file = %file.display(), "attribute removed");
        self.prune_dir(&dir)?;
        Ok(())
    }

    /// Removes every attribute of `target` and its attribute directory.
    ///
    /// Returns the number of attributes removed.
    pub fn remove_all(&self, target: &Path) -> Result<usize> {
        let dir = self.require_attr_dir(target)?;

        let mut removed = 0;
        for entry in self.entries(&dir)? {
            match self.fs.delete_file(&dir.join(&entry)) {
                Ok(()) => removed += 1,
                Err(e) if is_missing(&e) => {}
                Err(e) => return Err(e),
            }
        }

        match self.fs.remove_dir_if_empty(&dir)? {
            RemoveDir::Removed => {
                debug!(dir = %dir.display(), removed, "attribute directory removed");
                Ok(removed)
            }
            RemoveDir::NotEmpty => Err(AttrError::Io(io::Error::new(
                io::ErrorKind::DirectoryNotEmpty,
                format!(
                    "{} still has entries after removing all attributes",
                    dir.display()
                ),
            ))),
        }
    }

    fn require_target(&self, target: &Path) -> Result<()> {
        if !self.fs.stat(target)?.exists() {
            return Err(AttrError::not_found(Missing::Target, target));
        }
        // An attribute file is not a target of its own.
        if let Some(owner) = target.parent().and_then(attr_dir_owner) {
            if self.fs.stat(&owner)?.exists() {
                return Err(AttrError::invalid(format!(
                    "{} is an attribute of {}",
                    target.display(),
                    owner.display()
                )));
            }
        }
        Ok(())
    }

    fn require_attr_dir(&self, target: &Path) -> Result<PathBuf> {
        let dir = attr_dir_path(target, &self.limits)?;
        self.require_target(target)?;
        if !self.fs.stat(&dir)?.is_dir() {
            return Err(AttrError::not_found(Missing::AttributeDirectory, dir));
        }
        Ok(dir)
    }

    fn require_attr_file(&self, target: &Path, name: &str) -> Result<(PathBuf, PathBuf, usize)> {
        validate_name(name, &self.limits)?;
        let dir = self.require_attr_dir(target)?;
        let file = attr_file_path(&dir, name, &self.limits)?;
        let stat = self.fs.stat(&file)?;
        if !stat.is_file() {
            return Err(AttrError::not_found(Missing::Attribute, file));
        }
        let len = usize::try_from(stat.len)
            .map_err(|_| AttrError::invalid(format!("{} is too large", file.display())))?;
        Ok((dir, file, len))
    }

    /// Raw directory entries, minus `.` and `..`.
    fn entries(&self, dir: &Path) -> Result<Vec<OsString>> {
        let mut entries = self.fs.list_dir(dir)?;
        entries.retain(|e| !e.to_str().is_some_and(is_pseudo_entry));
        Ok(entries)
    }

    /// Attribute names in `dir`. Entries that are not regular files, or whose
    /// names are not UTF-8, are not attributes and are skipped.
    fn read_names(&self, dir: &Path) -> Result<AttrNames> {
        let mut names = AttrNames::new();
        for entry in self.entries(dir)? {
            if !self.fs.stat(&dir.join(&entry))?.is_file() {
                debug!(dir = %dir.display(), entry = ?entry, "skipping non-file entry");
                continue;
            }
            match entry.into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!(
                    dir = %dir.display(),
                    entry = ?raw,
                    "skipping attribute file with a non UTF-8 name"
                ),
            }
        }
        Ok(names)
    }

    /// Removes `dir` if no entries remain. A populated directory is left alone.
    fn prune_dir(&self, dir: &Path) -> Result<bool> {
        let entries = self.entries(dir)?.len();
        if entries > 0 {
            debug!(dir = %dir.display(), entries, "attribute directory still in use");
            return Ok(false);
        }
        match self.fs.remove_dir_if_empty(dir)? {
            RemoveDir::Removed => {
                debug!(dir = %dir.display(), "attribute directory removed");
                Ok(true)
            }
            RemoveDir::NotEmpty => Ok(false),
        }
    }
}

fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::memory::{FsOp, MemFs};

    const TARGET: &str = "/tmp/foo.txt";
    const ATTR_DIR: &str = "/tmp/.foo.txt_attr";

    fn store() -> (MemFs, AttributeStore<MemFs>) {
        let fs = MemFs::new().with_file(TARGET, b"file body");
        (fs.clone(), AttributeStore::new(fs))
    }

    fn target() -> &'static Path {
        Path::new(TARGET)
    }

    // --- set ---

    #[test]
    fn set_creates_directory_lazily() {
        let (fs, store) = store();
        assert!(!fs.exists(ATTR_DIR));

        let written = store.set(target(), "owner", b"alice").unwrap();

        assert_eq!(written, 5);
        assert!(fs.is_dir(ATTR_DIR));
        assert_eq!(
            fs.contents("/tmp/.foo.txt_attr/owner").as_deref(),
            Some(&b"alice"[..])
        );
    }

    #[test]
    fn set_uses_configured_modes() {
        let fs = MemFs::new().with_file(TARGET, b"");
        let limits = Limits {
            dir_mode: 0o700,
            file_mode: 0o600,
            ..Limits::default()
        };
        let store = AttributeStore::with_limits(fs.clone(), limits);
        store.set(target(), "k", b"v").unwrap();
        assert_eq!(fs.mode(ATTR_DIR), Some(0o700));
        assert_eq!(fs.mode("/tmp/.foo.txt_attr/k"), Some(0o600));
    }

    #[test]
    fn set_overwrites_with_shorter_value() {
        let (fs, store) = store();
        store.set(target(), "owner", b"a-very-long-owner").unwrap();
        store.set(target(), "owner", b"bob").unwrap();
        assert_eq!(store.get(target(), "owner").unwrap(), b"bob");
        assert_eq!(
            fs.contents("/tmp/.foo.txt_attr/owner").as_deref(),
            Some(&b"bob"[..])
        );
    }

    #[test]
    fn set_works_on_directories() {
        let fs = MemFs::new().with_dir("/srv/data");
        let store = AttributeStore::new(fs.clone());
        store.set(Path::new("/srv/data"), "tier", b"hot").unwrap();
        assert!(fs.is_dir("/srv/.data_attr"));
        assert_eq!(store.get(Path::new("/srv/data"), "tier").unwrap(), b"hot");
    }

    #[test]
    fn set_accepts_empty_and_binary_values() {
        let (_, store) = store();
        store.set(target(), "empty", b"").unwrap();
        store.set(target(), "bin", &[0, 255, 10, 0]).unwrap();
        assert_eq!(store.get(target(), "empty").unwrap(), b"");
        assert_eq!(store.get(target(), "bin").unwrap(), vec![0, 255, 10, 0]);
    }

    #[test]
    fn set_on_missing_target_is_not_found() {
        let (fs, store) = store();
        let err = store
            .set(Path::new("/tmp/nope"), "owner", b"alice")
            .unwrap_err();
        assert!(matches!(
            err,
            AttrError::NotFound {
                what: Missing::Target,
                ..
            }
        ));
        assert!(!fs.exists("/tmp/.nope_attr"));
    }

    #[test]
    fn set_rejects_oversized_value() {
        let fs = MemFs::new().with_file(TARGET, b"");
        let limits = Limits {
            max_value_size: 4,
            ..Limits::default()
        };
        let store = AttributeStore::with_limits(fs.clone(), limits);
        store.set(target(), "ok", b"1234").unwrap();
        let err = store.set(target(), "big", b"12345").unwrap_err();
        assert!(matches!(err, AttrError::SizeExceeded { size: 5, max: 4 }));
        assert!(!fs.exists("/tmp/.foo.txt_attr/big"));
    }

    #[test]
    fn set_rejects_bad_names_before_touching_disk() {
        let (fs, store) = store();
        for name in ["", "a:b", "a/b", ".."] {
            let err = store.set(target(), name, b"v").unwrap_err();
            assert!(matches!(err, AttrError::InvalidArgument(_)), "{name}");
        }
        assert!(!fs.exists(ATTR_DIR));
    }

    #[test]
    fn set_refuses_when_attr_path_is_a_file() {
        let fs = MemFs::new()
            .with_file(TARGET, b"")
            .with_file(ATTR_DIR, b"squatter");
        let store = AttributeStore::new(fs);
        let err = store.set(target(), "owner", b"alice").unwrap_err();
        assert!(matches!(err, AttrError::Io(_)));
    }

    #[test]
    fn failed_write_leaves_partial_file() {
        let (fs, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        fs.fail(FsOp::Write);

        let err = store.set(target(), "owner", b"bob").unwrap_err();
        assert!(matches!(err, AttrError::Io(_)));
        // No rollback: the old value is gone, the new one never landed.
        assert_eq!(
            fs.contents("/tmp/.foo.txt_attr/owner").as_deref(),
            Some(&b""[..])
        );
    }

    // --- get ---

    #[test]
    fn get_missing_pieces_are_not_found() {
        let (_, store) = store();
        let err = store.get(Path::new("/tmp/nope"), "owner").unwrap_err();
        assert!(matches!(err, AttrError::NotFound { what: Missing::Target, .. }));

        let err = store.get(target(), "owner").unwrap_err();
        assert!(matches!(
            err,
            AttrError::NotFound {
                what: Missing::AttributeDirectory,
                ..
            }
        ));

        store.set(target(), "group", b"staff").unwrap();
        let err = store.get(target(), "owner").unwrap_err();
        assert!(matches!(
            err,
            AttrError::NotFound {
                what: Missing::Attribute,
                ..
            }
        ));
    }

    #[test]
    fn get_into_fits() {
        let (_, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        let mut buf = [0u8; 16];
        let t = store.get_into(target(), "owner", &mut buf).unwrap();
        assert_eq!(t, Transfer { copied: 5, stored: 5 });
        assert!(!t.is_truncated());
        assert_eq!(&buf[..5], b"alice");
    }

    #[test]
    fn get_into_short_buffer_truncates() {
        let (_, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        let mut buf = [0u8; 3];
        let t = store.get_into(target(), "owner", &mut buf).unwrap();
        assert_eq!(t, Transfer { copied: 3, stored: 5 });
        assert!(t.is_truncated());
        assert_eq!(&buf, b"ali");
        assert!(matches!(
            t.into_result(),
            Err(AttrError::Truncated { copied: 3, stored: 5 })
        ));
    }

    #[test]
    fn get_into_exact_buffer_is_complete() {
        let (_, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        let mut buf = [0u8; 5];
        let t = store.get_into(target(), "owner", &mut buf).unwrap();
        assert_eq!(t.into_result().unwrap(), 5);
    }

    #[test]
    fn get_read_failure_is_io() {
        let (fs, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        fs.fail(FsOp::Read);
        assert!(matches!(
            store.get(target(), "owner"),
            Err(AttrError::Io(_))
        ));
    }

    // --- list ---

    #[test]
    fn list_excludes_pseudo_entries() {
        let (_, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        store.set(target(), "group", b"staff").unwrap();
        let names = store.list_names(target()).unwrap().sorted();
        assert_eq!(names.join(), "group:owner");
    }

    #[test]
    fn list_without_directory_is_not_found() {
        let (_, store) = store();
        assert!(store.list_names(target()).unwrap_err().is_not_found());
    }

    #[test]
    fn list_empty_directory_is_empty_string() {
        let fs = MemFs::new().with_file(TARGET, b"").with_dir(ATTR_DIR);
        let store = AttributeStore::new(fs);
        let names = store.list_names(target()).unwrap();
        assert!(names.is_empty());
        assert_eq!(names.join(), "");

        let mut buf = [b'x'; 8];
        assert_eq!(store.list_names_into(target(), &mut buf).unwrap(), 0);
        assert_eq!(buf, [b'x'; 8]);
    }

    #[test]
    fn list_into_returns_logical_length() {
        let (_, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        store.set(target(), "group", b"staff").unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(store.list_names_into(target(), &mut buf).unwrap(), 11);
    }

    #[test]
    fn list_skips_entries_that_are_not_files() {
        let (fs, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        let _ = fs.clone().with_dir("/tmp/.foo.txt_attr/.stray_attr");
        assert_eq!(store.list_names(target()).unwrap().join(), "owner");
    }

    #[test]
    fn attribute_file_cannot_be_a_target() {
        let (fs, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        let owner_file = Path::new("/tmp/.foo.txt_attr/owner");

        let err = store.set(owner_file, "meta", b"x").unwrap_err();
        assert!(matches!(err, AttrError::InvalidArgument(_)));
        assert!(matches!(
            store.list_names(owner_file),
            Err(AttrError::InvalidArgument(_))
        ));
        assert!(!fs.exists("/tmp/.foo.txt_attr/.owner_attr"));
        assert_eq!(store.list_names(target()).unwrap().join(), "owner");
        assert_eq!(store.remove_all(target()).unwrap(), 1);
    }

    #[test]
    fn attr_shaped_directory_without_owner_is_ordinary() {
        let fs = MemFs::new().with_file("/tmp/.cache_attr/entry", b"");
        let store = AttributeStore::new(fs);
        let entry = Path::new("/tmp/.cache_attr/entry");
        store.set(entry, "k", b"v").unwrap();
        assert_eq!(store.get(entry, "k").unwrap(), b"v");
    }

    #[test]
    fn list_names_each_once_after_overwrite() {
        let (_, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        store.set(target(), "owner", b"bob").unwrap();
        let names = store.list_names(target()).unwrap();
        assert_eq!(names.iter().filter(|n| *n == "owner").count(), 1);
    }

    // --- remove ---

    #[test]
    fn remove_keeps_directory_while_others_remain() {
        let (fs, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        store.set(target(), "group", b"staff").unwrap();

        store.remove(target(), "owner").unwrap();
        assert!(fs.is_dir(ATTR_DIR));
        assert_eq!(store.list_names(target()).unwrap().join(), "group");

        store.remove(target(), "group").unwrap();
        assert!(!fs.exists(ATTR_DIR));
    }

    #[test]
    fn remove_missing_attribute_is_not_found() {
        let (_, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        let err = store.remove(target(), "group").unwrap_err();
        assert!(matches!(
            err,
            AttrError::NotFound {
                what: Missing::Attribute,
                ..
            }
        ));
    }

    #[test]
    fn remove_then_get_is_not_found() {
        let (_, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        store.remove(target(), "owner").unwrap();
        assert!(store.get(target(), "owner").unwrap_err().is_not_found());
    }

    #[test]
    fn remove_surfaces_delete_failure() {
        let (fs, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        fs.fail(FsOp::DeleteFile);
        assert!(matches!(
            store.remove(target(), "owner"),
            Err(AttrError::Io(_))
        ));
    }

    #[test]
    fn remove_surfaces_rmdir_failure_on_empty_dir() {
        let (fs, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        fs.fail(FsOp::RemoveDir);
        assert!(matches!(
            store.remove(target(), "owner"),
            Err(AttrError::Io(_))
        ));
    }

    #[test]
    fn remove_does_not_touch_rmdir_while_populated() {
        let (fs, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        store.set(target(), "group", b"staff").unwrap();
        // Would fail if attempted.
        fs.fail(FsOp::RemoveDir);
        store.remove(target(), "owner").unwrap();
    }

    // --- remove_all ---

    #[test]
    fn remove_all_deletes_everything() {
        let (fs, store) = store();
        for name in ["a", "b", "c"] {
            store.set(target(), name, name.as_bytes()).unwrap();
        }
        assert_eq!(store.remove_all(target()).unwrap(), 3);
        assert!(!fs.exists(ATTR_DIR));
        assert!(store.list_names(target()).unwrap_err().is_not_found());
        assert!(store.remove_all(target()).unwrap_err().is_not_found());
    }

    #[test]
    fn remove_all_on_empty_directory_just_removes_it() {
        let fs = MemFs::new().with_file(TARGET, b"").with_dir(ATTR_DIR);
        let store = AttributeStore::new(fs.clone());
        fs.fail(FsOp::DeleteFile);
        assert_eq!(store.remove_all(target()).unwrap(), 0);
        assert!(!fs.exists(ATTR_DIR));
    }

    #[test]
    fn remove_all_stops_on_delete_failure() {
        let (fs, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        fs.fail(FsOp::DeleteFile);
        assert!(matches!(
            store.remove_all(target()),
            Err(AttrError::Io(_))
        ));
        assert!(fs.is_dir(ATTR_DIR));
    }

    #[cfg(unix)]
    #[test]
    fn remove_all_deletes_entries_with_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (fs, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        let odd = Path::new(ATTR_DIR).join(OsStr::from_bytes(b"bad\xff"));
        let _ = fs.clone().with_file(&odd, b"");

        assert_eq!(store.list_names(target()).unwrap().join(), "owner");
        assert_eq!(store.remove_all(target()).unwrap(), 2);
        assert!(!fs.exists(&odd));
        assert!(!fs.exists(ATTR_DIR));
    }

    #[test]
    fn remove_all_leaves_target_untouched() {
        let (fs, store) = store();
        store.set(target(), "owner", b"alice").unwrap();
        store.remove_all(target()).unwrap();
        assert_eq!(fs.contents(TARGET).as_deref(), Some(&b"file body"[..]));
    }
}
