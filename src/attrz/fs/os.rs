use super::{EntryType, FsService, RemoveDir, Stat};
use crate::error::{AttrError, Result};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Production backend over the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl OsFs {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
fn dir_builder(mode: u32) -> fs::DirBuilder {
    use std::os::unix::fs::DirBuilderExt;
    let mut builder = fs::DirBuilder::new();
    builder.mode(mode);
    builder
}

#[cfg(not(unix))]
fn dir_builder(_mode: u32) -> fs::DirBuilder {
    fs::DirBuilder::new()
}

#[cfg(unix)]
fn create_options(mode: u32) -> OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true).mode(mode);
    options
}

#[cfg(not(unix))]
fn create_options(_mode: u32) -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    options
}

impl FsService for OsFs {
    type Reader = File;
    type Writer = File;

    fn stat(&self, path: &Path) -> Result<Stat> {
        // Follows symlinks: a link is attributed as its target.
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(Stat {
                kind: EntryType::Directory,
                len: 0,
            }),
            Ok(meta) if meta.is_file() => Ok(Stat {
                kind: EntryType::File,
                len: meta.len(),
            }),
            // Only regular files and directories can carry attributes.
            Ok(_) => Ok(Stat::missing()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Stat::missing()),
            Err(e) => Err(AttrError::Io(e)),
        }
    }

    fn create_dir(&self, path: &Path, mode: u32) -> Result<()> {
        dir_builder(mode).create(path).map_err(AttrError::Io)
    }

    fn remove_dir_if_empty(&self, path: &Path) -> Result<RemoveDir> {
        let mut entries = fs::read_dir(path).map_err(AttrError::Io)?;
        if entries.next().is_some() {
            return Ok(RemoveDir::NotEmpty);
        }
        match fs::remove_dir(path) {
            Ok(()) => Ok(RemoveDir::Removed),
            // An entry appeared between the listing and the removal.
            Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => Ok(RemoveDir::NotEmpty),
            Err(e) => Err(AttrError::Io(e)),
        }
    }

    fn create_or_truncate_file(&self, path: &Path, mode: u32) -> Result<()> {
        create_options(mode)
            .open(path)
            .map(drop)
            .map_err(AttrError::Io)
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(AttrError::Io)
    }

    fn open_read(&self, path: &Path) -> Result<File> {
        File::open(path).map_err(AttrError::Io)
    }

    fn open_write(&self, path: &Path) -> Result<File> {
        OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(AttrError::Io)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<OsString>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path).map_err(AttrError::Io)? {
            let entry = entry.map_err(AttrError::Io)?;
            names.push(entry.file_name());
        }
        Ok(names)
    }
}
