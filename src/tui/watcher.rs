//! Watches the bookmarks file so external edits (the browser saving its
//! bookmarks) show up without a manual refresh.
//!
//! Browsers and our own store replace the file by renaming a temp file over
//! it, which drops a watch placed on the file itself. The watch therefore
//! sits on the parent directory and events are filtered by file name.

use notify::{
    Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    event::{AccessKind, AccessMode, ModifyKind},
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

pub struct FileWatcher {
    watcher: RecommendedWatcher,
    receiver: Receiver<Result<Event, notify::Error>>,
    directory: Option<PathBuf>,
    file_name: Option<OsString>,
    /// Ignore events within this duration of the last reload
    last_reload: Instant,
    debounce_duration: Duration,
}

impl FileWatcher {
    pub fn new() -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let watcher = notify::recommended_watcher(tx)?;

        Ok(Self {
            watcher,
            receiver: rx,
            directory: None,
            file_name: None,
            last_reload: Instant::now(),
            debounce_duration: Duration::from_millis(250),
        })
    }

    /// Start watching `path`. Replaces any previous watch.
    pub fn watch(&mut self, path: &Path) -> Result<(), notify::Error> {
        if let Some(ref old) = self.directory {
            let _ = self.watcher.unwatch(old);
        }

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        self.watcher.watch(&directory, RecursiveMode::NonRecursive)?;
        tracing::debug!(directory = %directory.display(), "watching for bookmark changes");

        self.directory = Some(directory);
        self.file_name = path.file_name().map(|n| n.to_os_string());
        self.last_reload = Instant::now();
        Ok(())
    }

    /// Drain pending events; true when the bookmarks file changed and the
    /// debounce window has passed.
    pub fn check_for_changes(&mut self) -> bool {
        let mut changed = false;

        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => {
                    if self.is_relevant_event(&event) {
                        changed = true;
                    }
                }
                Ok(Err(e)) => tracing::warn!(error = %e, "file watch error"),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if changed {
            let now = Instant::now();
            if now.duration_since(self.last_reload) >= self.debounce_duration {
                self.last_reload = now;
                return true;
            }
        }
        false
    }

    /// Drop pending events and restart the debounce window, used after the
    /// app wrote the file itself.
    pub fn mark_reloaded(&mut self) {
        while self.receiver.try_recv().is_ok() {}
        self.last_reload = Instant::now();
    }

    fn is_relevant_event(&self, event: &Event) -> bool {
        let Some(ref file_name) = self.file_name else {
            return false;
        };
        let touches_file = event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()));
        if !touches_file {
            return false;
        }

        matches!(
            event.kind,
            EventKind::Modify(ModifyKind::Data(_))
                | EventKind::Modify(ModifyKind::Name(_))
                | EventKind::Modify(ModifyKind::Any)
                | EventKind::Access(AccessKind::Close(AccessMode::Write))
                | EventKind::Create(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange};

    fn watcher_for(path: &Path) -> FileWatcher {
        let mut watcher = FileWatcher::new().unwrap();
        watcher.watch(path).unwrap();
        watcher
    }

    #[test]
    fn test_filters_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bookmarks");
        let watcher = watcher_for(&path);

        let ours = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(path.clone());
        let other = Event::new(EventKind::Create(CreateKind::File))
            .add_path(dir.path().join("History"));

        assert!(watcher.is_relevant_event(&ours));
        assert!(!watcher.is_relevant_event(&other));
    }

    #[test]
    fn test_ignores_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bookmarks");
        let watcher = watcher_for(&path);

        let read = Event::new(EventKind::Access(AccessKind::Open(AccessMode::Read)))
            .add_path(path);
        assert!(!watcher.is_relevant_event(&read));
    }
}
