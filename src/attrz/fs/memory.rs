use super::{EntryType, FsService, RemoveDir, Stat, PSEUDO_ENTRIES};
use crate::error::{AttrError, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::ffi::OsString;
use std::io::{self, Cursor, ErrorKind};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Clone)]
enum Node {
    Dir { mode: u32 },
    File { data: Vec<u8>, mode: u32 },
}

/// Primitive operations that can be made to fail in [`MemFs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsOp {
    Stat,
    CreateDir,
    RemoveDir,
    CreateFile,
    DeleteFile,
    Read,
    Write,
    ListDir,
}

#[derive(Debug, Default)]
struct Tree {
    nodes: BTreeMap<PathBuf, Node>,
    failing: HashSet<FsOp>,
}

impl Tree {
    fn check(&self, op: FsOp) -> Result<()> {
        if self.failing.contains(&op) {
            return Err(AttrError::Io(io::Error::other(format!(
                "Simulated {:?} failure",
                op
            ))));
        }
        Ok(())
    }

    fn require_parent_dir(&self, path: &Path) -> Result<()> {
        let parent = path.parent().ok_or_else(|| not_found(path))?;
        match self.nodes.get(parent) {
            Some(Node::Dir { .. }) => Ok(()),
            _ => Err(not_found(parent)),
        }
    }

    fn children<'a>(&'a self, dir: &'a Path) -> impl Iterator<Item = &'a PathBuf> + 'a {
        self.nodes.keys().filter(move |p| p.parent() == Some(dir))
    }
}

fn not_found(path: &Path) -> AttrError {
    AttrError::Io(io::Error::new(
        ErrorKind::NotFound,
        format!("{} does not exist", path.display()),
    ))
}

fn already_exists(path: &Path) -> AttrError {
    AttrError::Io(io::Error::new(
        ErrorKind::AlreadyExists,
        format!("{} already exists", path.display()),
    ))
}

/// In-memory filesystem for testing.
///
/// Uses `Rc<RefCell<..>>` since the store is single-threaded; cloning a `MemFs`
/// shares the same tree, which lets tests keep a handle for inspection while the
/// store owns another. Paths are expected to be absolute; `/` always exists.
#[derive(Debug, Clone)]
pub struct MemFs {
    tree: Rc<RefCell<Tree>>,
}

impl Default for MemFs {
    fn default() -> Self {
        let mut tree = Tree::default();
        tree.nodes
            .insert(PathBuf::from("/"), Node::Dir { mode: 0o755 });
        Self {
            tree: Rc::new(RefCell::new(tree)),
        }
    }
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `path` and any missing parents as directories.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.mkdir_all(path.as_ref());
        self
    }

    /// Creates a regular file holding `data`, creating missing parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, data: &[u8]) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.mkdir_all(parent);
        }
        self.tree.borrow_mut().nodes.insert(
            path.to_path_buf(),
            Node::File {
                data: data.to_vec(),
                mode: 0o644,
            },
        );
        self
    }

    fn mkdir_all(&self, path: &Path) {
        let mut tree = self.tree.borrow_mut();
        for ancestor in path.ancestors() {
            tree.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir { mode: 0o755 });
        }
    }

    /// Makes every subsequent call of `op` fail with an I/O error.
    pub fn fail(&self, op: FsOp) {
        self.tree.borrow_mut().failing.insert(op);
    }

    pub fn clear_failures(&self) {
        self.tree.borrow_mut().failing.clear();
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.tree.borrow().nodes.contains_key(path.as_ref())
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        matches!(
            self.tree.borrow().nodes.get(path.as_ref()),
            Some(Node::Dir { .. })
        )
    }

    /// Content of a regular file, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.tree.borrow().nodes.get(path.as_ref()) {
            Some(Node::File { data, .. }) => Some(data.clone()),
            _ => None,
        }
    }

    /// Mode recorded at creation time.
    pub fn mode(&self, path: impl AsRef<Path>) -> Option<u32> {
        match self.tree.borrow().nodes.get(path.as_ref()) {
            Some(Node::Dir { mode }) | Some(Node::File { mode, .. }) => Some(*mode),
            None => None,
        }
    }
}

/// Write handle into a [`MemFs`] file. Bytes land in the tree as they are written.
pub struct MemWriter {
    tree: Rc<RefCell<Tree>>,
    path: PathBuf,
}

impl io::Write for MemWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut tree = self.tree.borrow_mut();
        if tree.failing.contains(&FsOp::Write) {
            return Err(io::Error::other("Simulated Write failure"));
        }
        match tree.nodes.get_mut(&self.path) {
            Some(Node::File { data, .. }) => {
                data.extend_from_slice(buf);
                Ok(buf.len())
            }
            _ => Err(io::Error::new(
                ErrorKind::NotFound,
                "file removed while open",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FsService for MemFs {
    type Reader = Cursor<Vec<u8>>;
    type Writer = MemWriter;

    fn stat(&self, path: &Path) -> Result<Stat> {
        let tree = self.tree.borrow();
        tree.check(FsOp::Stat)?;
        Ok(match tree.nodes.get(path) {
            Some(Node::Dir { .. }) => Stat {
                kind: EntryType::Directory,
                len: 0,
            },
            Some(Node::File { data, .. }) => Stat {
                kind: EntryType::File,
                len: data.len() as u64,
            },
            None => Stat::missing(),
        })
    }

    fn create_dir(&self, path: &Path, mode: u32) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.check(FsOp::CreateDir)?;
        tree.require_parent_dir(path)?;
        if tree.nodes.contains_key(path) {
            return Err(already_exists(path));
        }
        tree.nodes.insert(path.to_path_buf(), Node::Dir { mode });
        Ok(())
    }

    fn remove_dir_if_empty(&self, path: &Path) -> Result<RemoveDir> {
        let mut tree = self.tree.borrow_mut();
        tree.check(FsOp::RemoveDir)?;
        match tree.nodes.get(path) {
            Some(Node::Dir { .. }) => {}
            Some(Node::File { .. }) => {
                return Err(AttrError::Io(io::Error::new(
                    ErrorKind::NotADirectory,
                    format!("{} is not a directory", path.display()),
                )))
            }
            None => return Err(not_found(path)),
        }
        if tree.children(path).next().is_some() {
            return Ok(RemoveDir::NotEmpty);
        }
        tree.nodes.remove(path);
        Ok(RemoveDir::Removed)
    }

    fn create_or_truncate_file(&self, path: &Path, mode: u32) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.check(FsOp::CreateFile)?;
        tree.require_parent_dir(path)?;
        match tree.nodes.get_mut(path) {
            Some(Node::File { data, .. }) => data.clear(),
            Some(Node::Dir { .. }) => return Err(already_exists(path)),
            None => {
                tree.nodes.insert(
                    path.to_path_buf(),
                    Node::File {
                        data: Vec::new(),
                        mode,
                    },
                );
            }
        }
        Ok(())
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.check(FsOp::DeleteFile)?;
        match tree.nodes.get(path) {
            Some(Node::File { .. }) => {
                tree.nodes.remove(path);
                Ok(())
            }
            Some(Node::Dir { .. }) => Err(AttrError::Io(io::Error::new(
                ErrorKind::IsADirectory,
                format!("{} is a directory", path.display()),
            ))),
            None => Err(not_found(path)),
        }
    }

    fn open_read(&self, path: &Path) -> Result<Cursor<Vec<u8>>> {
        let tree = self.tree.borrow();
        tree.check(FsOp::Read)?;
        match tree.nodes.get(path) {
            Some(Node::File { data, .. }) => Ok(Cursor::new(data.clone())),
            _ => Err(not_found(path)),
        }
    }

    fn open_write(&self, path: &Path) -> Result<MemWriter> {
        let mut tree = self.tree.borrow_mut();
        match tree.nodes.get_mut(path) {
            // Handles start at offset zero, same as a fresh `open(O_WRONLY)`.
            Some(Node::File { data, .. }) => data.clear(),
            _ => return Err(not_found(path)),
        }
        Ok(MemWriter {
            tree: Rc::clone(&self.tree),
            path: path.to_path_buf(),
        })
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<OsString>> {
        let tree = self.tree.borrow();
        tree.check(FsOp::ListDir)?;
        if !matches!(tree.nodes.get(path), Some(Node::Dir { .. })) {
            return Err(not_found(path));
        }
        let mut names: Vec<OsString> = PSEUDO_ENTRIES.iter().map(|n| OsString::from(*n)).collect();
        names.extend(
            tree.children(path)
                .filter_map(|p| p.file_name().map(|n| n.to_os_string())),
        );
        Ok(names)
    }
}
