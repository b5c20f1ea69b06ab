//! The active-dictionary slot.
//!
//! Opening a dictionary runs on a background thread. The result is installed
//! only if no newer open was requested meanwhile, and it replaces the
//! previous dictionary in one step. Readers work on `Arc` snapshots, so a
//! render that started before a swap finishes against the old dictionary
//! and never sees a half-swapped one.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::{Arc, RwLock};
use std::thread;

use log::{debug, info, warn};

use super::dictionary::DictionaryIndex;
use super::types::document::DocumentOpener;
use super::types::error::{DictError, Result};
use super::types::options::DictOptions;

/// A dictionary open running in the background.
#[derive(Debug)]
pub struct PendingOpen {
    generation: u64,
    path: PathBuf,
    receiver: Receiver<Result<DictionaryIndex>>,
}

impl PendingOpen {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Holds the currently active dictionary.
#[derive(Debug, Default)]
pub struct ActiveDictionary {
    current: RwLock<Option<Arc<DictionaryIndex>>>,
    latest_generation: AtomicU64,
}

impl ActiveDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the active dictionary, if any.
    pub fn current(&self) -> Result<Option<Arc<DictionaryIndex>>> {
        let slot = self.current.read().map_err(|_| DictError::LockPoisoned)?;
        Ok(slot.clone())
    }

    /// Starts opening `path` on a background thread.
    ///
    /// Every call that starts its thread supersedes the opens started before it.
    pub fn open_in_background(
        &self,
        opener: Arc<dyn DocumentOpener>,
        path: impl AsRef<Path>,
        options: DictOptions,
    ) -> Result<PendingOpen> {
        let path = path.as_ref().to_path_buf();
        let (sender, receiver) = mpsc::channel();

        let thread_path = path.clone();
        let generation = self.supersede_after(|| {
            thread::Builder::new()
                .name("dict-open".to_string())
                .spawn(move || {
                    let result = DictionaryIndex::open(opener.as_ref(), &thread_path, options);
                    // The receiver is gone when the caller abandoned this open.
                    let _ = sender.send(result);
                })
                .map(drop)
        })?;

        debug!("Open #{} started for {}", generation, path.display());
        Ok(PendingOpen {
            generation,
            path,
            receiver,
        })
    }

    /// Waits for a background open and installs its dictionary.
    ///
    /// # Errors
    /// - [`DictError::Superseded`] if a newer open was requested meanwhile
    /// - The open's own error; the previous dictionary stays active
    pub fn publish(&self, pending: PendingOpen) -> Result<Arc<DictionaryIndex>> {
        let result = pending
            .receiver
            .recv()
            .map_err(|_| DictError::Disconnected)?;
        self.install(pending.generation, &pending.path, result)
    }

    /// Non-blocking variant of [`publish`](Self::publish).
    ///
    /// Returns `None` while the open is still running.
    pub fn try_publish(&self, pending: &PendingOpen) -> Option<Result<Arc<DictionaryIndex>>> {
        match pending.receiver.try_recv() {
            Ok(result) => Some(self.install(pending.generation, &pending.path, result)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(DictError::Disconnected)),
        }
    }

    /// Installs an already built dictionary, superseding pending opens.
    pub fn replace(&self, dictionary: DictionaryIndex) -> Result<Arc<DictionaryIndex>> {
        let generation = self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let dictionary = Arc::new(dictionary);
        let mut slot = self.current.write().map_err(|_| DictError::LockPoisoned)?;
        *slot = Some(Arc::clone(&dictionary));
        debug!("Dictionary replaced directly as #{}", generation);
        Ok(dictionary)
    }

    /// Drops the active dictionary and supersedes pending opens.
    pub fn close(&self) -> Result<()> {
        self.latest_generation.fetch_add(1, Ordering::SeqCst);
        let mut slot = self.current.write().map_err(|_| DictError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }

    /// Whether `pending` is still the most recent open request.
    pub fn is_latest(&self, pending: &PendingOpen) -> bool {
        pending.generation == self.latest_generation.load(Ordering::SeqCst)
    }

    /// Runs `start` and, only if it succeeds, claims the next generation.
    /// A failed start leaves earlier opens current.
    fn supersede_after<F>(&self, start: F) -> Result<u64>
    where
        F: FnOnce() -> std::io::Result<()>,
    {
        start()?;
        Ok(self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn install(
        &self,
        generation: u64,
        path: &Path,
        result: Result<DictionaryIndex>,
    ) -> Result<Arc<DictionaryIndex>> {
        // Generation is checked under the write lock so two installs cannot interleave.
        let mut slot = self.current.write().map_err(|_| DictError::LockPoisoned)?;
        if generation != self.latest_generation.load(Ordering::SeqCst) {
            debug!("Discarding superseded open #{} of {}", generation, path.display());
            return Err(DictError::Superseded { generation });
        }

        let dictionary = match result {
            Ok(dictionary) => Arc::new(dictionary),
            Err(e) => {
                warn!("Failed to open {}: {}", path.display(), e);
                return Err(e);
            }
        };

        *slot = Some(Arc::clone(&dictionary));
        info!("Active dictionary is now '{}'", dictionary.title());
        Ok(dictionary)
    }
}
