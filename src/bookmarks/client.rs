//! Non-blocking access to a [`BookmarkStore`].
//!
//! Each request runs on its own worker thread and reports back exactly once
//! over a channel, so the UI loop keeps drawing while the store works.
//! Requests are neither de-duplicated nor cancelled.

use super::{BookmarkStore, BookmarkTree, StoreError};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Completion of a store request.
#[derive(Debug)]
pub enum StoreEvent {
    TreeLoaded(Result<BookmarkTree, StoreError>),
    Removed {
        id: String,
        result: Result<(), StoreError>,
    },
}

pub struct StoreClient {
    store: Arc<dyn BookmarkStore>,
    sender: Sender<StoreEvent>,
    receiver: Receiver<StoreEvent>,
    in_flight: usize,
}

impl StoreClient {
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            store,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn store(&self) -> &Arc<dyn BookmarkStore> {
        &self.store
    }

    /// Start fetching the full tree.
    pub fn fetch_tree(&mut self) {
        self.spawn(|store| StoreEvent::TreeLoaded(store.get_tree()));
    }

    /// Start removing the node `id`.
    pub fn remove(&mut self, id: String) {
        self.spawn(move |store| {
            let result = store.remove(&id);
            StoreEvent::Removed { id, result }
        });
    }

    /// Number of requests whose completion has not been received yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Next completed request, if one is ready.
    pub fn try_next(&mut self) -> Option<StoreEvent> {
        match self.receiver.try_recv() {
            Ok(event) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(event)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next completed request.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<StoreEvent> {
        if self.in_flight == 0 {
            return None;
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(event)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Block until the next completion or until `deadline` passes.
    pub fn next_before(&mut self, deadline: Instant) -> Option<StoreEvent> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        self.next_timeout(remaining)
    }

    fn spawn<F>(&mut self, request: F)
    where
        F: FnOnce(&dyn BookmarkStore) -> StoreEvent + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let sender = self.sender.clone();
        self.in_flight += 1;

        thread::spawn(move || {
            let event = request(store.as_ref());
            // Receiver gone means the UI shut down; nothing left to notify
            let _ = sender.send(event);
        });
    }
}
