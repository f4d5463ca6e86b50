//! Host bookmark store abstraction.
//!
//! The UI never owns bookmarks: it asks a [`BookmarkStore`] for the whole
//! tree and asks it to remove nodes by id. Every mutation is followed by a
//! fresh [`BookmarkStore::get_tree`].

use super::{BookmarkNode, BookmarkTree, chromium};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use thiserror::Error;

/// Errors reported by a bookmark store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not valid JSON or has the wrong shape
    #[error("Malformed bookmarks file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but is not a bookmarks file
    #[error("Invalid bookmarks file: {0}")]
    InvalidFormat(String),

    /// No node with this id exists
    #[error("Bookmark not found: {0}")]
    NotFound(String),

    /// Folders must be emptied before removal
    #[error("Can't remove non-empty folder: {0}")]
    NonEmptyFolder(String),

    /// The permanent root folders cannot be removed
    #[error("Can't modify the root bookmark folder: {0}")]
    RootFolder(String),

    /// The store refused to serve the request
    #[error("Bookmark store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The two host capabilities the manager relies on.
///
/// Calls may block; [`super::StoreClient`] runs them off the UI loop.
pub trait BookmarkStore: Send + Sync {
    /// Fetch the complete bookmark hierarchy.
    fn get_tree(&self) -> Result<BookmarkTree, StoreError>;

    /// Remove a single node by id.
    fn remove(&self, id: &str) -> Result<(), StoreError>;

    /// Short human-readable name shown in the title bar.
    fn describe(&self) -> String;

    /// File to watch for external changes, if any.
    fn watch_path(&self) -> Option<&Path> {
        None
    }
}

/// Store backed by a Chromium-format `Bookmarks` JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles between concurrent removals
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, StoreError> {
        fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))
    }

    /// Replace the file contents atomically (temp file in the same dir + rename).
    fn write_atomic(&self, contents: &[u8]) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(contents)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;
        Ok(())
    }
}

impl BookmarkStore for JsonFileStore {
    fn get_tree(&self) -> Result<BookmarkTree, StoreError> {
        let contents = self.read()?;
        let tree = chromium::parse(&contents)?;
        tracing::debug!(
            path = %self.path.display(),
            bookmarks = tree.bookmark_count(),
            "loaded bookmarks file"
        );
        Ok(tree)
    }

    fn remove(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        let mut document: serde_json::Value = serde_json::from_str(&self.read()?)?;
        chromium::remove(&mut document, id)?;

        let contents = serde_json::to_vec_pretty(&document)?;
        self.write_atomic(&contents)?;
        tracing::info!(id, path = %self.path.display(), "removed bookmark");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn watch_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// In-memory store, used for demos and tests.
///
/// Failures can be switched on to exercise the error paths, and the number
/// of tree fetches is counted so callers can tell whether a reload happened.
#[derive(Debug)]
pub struct MemoryStore {
    tree: Mutex<BookmarkTree>,
    fail_loads: AtomicBool,
    fail_removes: AtomicBool,
    loads: AtomicUsize,
}

impl MemoryStore {
    pub fn new(tree: BookmarkTree) -> Self {
        Self {
            tree: Mutex::new(tree),
            fail_loads: AtomicBool::new(false),
            fail_removes: AtomicBool::new(false),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }

    /// How many times the tree has been fetched.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BookmarkTree>, StoreError> {
        self.tree
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

impl BookmarkStore for MemoryStore {
    fn get_tree(&self) -> Result<BookmarkTree, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("tree fetch rejected".to_string()));
        }
        Ok(self.lock()?.clone())
    }

    fn remove(&self, id: &str) -> Result<(), StoreError> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("remove of {} rejected", id)));
        }

        let mut tree = self.lock()?;
        if tree.top_level().iter().any(|node| node.id() == id) {
            return Err(StoreError::RootFolder(id.to_string()));
        }
        remove_node(tree.root_mut(), id)
            .unwrap_or_else(|| Err(StoreError::NotFound(id.to_string())))
    }

    fn describe(&self) -> String {
        "in-memory bookmarks".to_string()
    }
}

fn remove_node(node: &mut BookmarkNode, id: &str) -> Option<Result<(), StoreError>> {
    let BookmarkNode::Folder {
        children: Some(children),
        ..
    } = node
    else {
        return None;
    };

    if let Some(pos) = children.iter().position(|child| child.id() == id) {
        if !children[pos].children().is_empty() {
            return Some(Err(StoreError::NonEmptyFolder(id.to_string())));
        }
        children.remove(pos);
        return Some(Ok(()));
    }

    children.iter_mut().find_map(|child| remove_node(child, id))
}
