//! Persistence of the ordered history document.

use crate::error::{HistoryError, Result};
use crate::model::ClipItem;
use crossbeam_channel::{Receiver, Sender};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// Durable storage for the full ordered collection.
pub trait HistoryPersistence: Send + Sync {
    /// Load the collection. A missing document is an empty history.
    fn load(&self) -> Result<Vec<ClipItem>>;

    /// Replace the stored collection with `items`.
    fn save(&self, items: &[ClipItem]) -> Result<()>;

    /// Block until previously accepted saves are durable.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// JSON array on disk, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
}

impl JsonDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HistoryPersistence for JsonDocument {
    fn load(&self) -> Result<Vec<ClipItem>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(HistoryError::io(&self.path, e)),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, items: &[ClipItem]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| HistoryError::io(parent, e))?;
        }

        let json = serde_json::to_vec_pretty(items)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|e| HistoryError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| HistoryError::io(&self.path, e))?;
        Ok(())
    }
}

/// In-memory document for tests and for running without a data directory.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    items: Mutex<Vec<ClipItem>>,
    saves: AtomicUsize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection, as if loaded from disk.
    pub fn with_items(items: Vec<ClipItem>) -> Self {
        Self {
            items: Mutex::new(items),
            saves: AtomicUsize::new(0),
        }
    }

    /// The most recently saved collection.
    pub fn snapshot(&self) -> Vec<ClipItem> {
        self.items.lock().map(|items| items.clone()).unwrap_or_default()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl HistoryPersistence for MemoryDocument {
    fn load(&self) -> Result<Vec<ClipItem>> {
        Ok(self.snapshot())
    }

    fn save(&self, items: &[ClipItem]) -> Result<()> {
        if let Ok(mut stored) = self.items.lock() {
            *stored = items.to_vec();
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

enum WriterCommand {
    Save(Vec<ClipItem>),
    Flush(Sender<()>),
}

/// Moves saves off the caller's thread.
///
/// Snapshots queue on a channel; a worker thread writes only the newest
/// queued snapshot, so bursts of mutations collapse into one write.
pub struct BackgroundWriter {
    inner: Arc<dyn HistoryPersistence>,
    tx: Option<Sender<WriterCommand>>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundWriter {
    pub fn spawn(inner: Arc<dyn HistoryPersistence>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded::<WriterCommand>();
        let worker_inner = Arc::clone(&inner);

        let handle = std::thread::Builder::new()
            .name("clipdeck-persist".to_string())
            .spawn(move || run_writer(worker_inner, rx))
            .map_err(|e| tracing::warn!("failed to spawn persistence thread: {}", e))
            .ok();

        Self {
            inner,
            tx: handle.as_ref().map(|_| tx),
            handle,
        }
    }
}

fn run_writer(inner: Arc<dyn HistoryPersistence>, rx: Receiver<WriterCommand>) {
    tracing::debug!("persistence writer started");

    while let Ok(first) = rx.recv() {
        let mut latest = None;
        let mut waiters = Vec::new();

        for command in std::iter::once(first).chain(rx.try_iter()) {
            match command {
                WriterCommand::Save(items) => latest = Some(items),
                WriterCommand::Flush(ack) => waiters.push(ack),
            }
        }

        if let Some(items) = latest {
            if let Err(e) = inner.save(&items) {
                tracing::warn!("failed to persist history: {}", e);
            }
        }

        for ack in waiters {
            let _ = ack.send(());
        }
    }

    tracing::debug!("persistence writer stopped");
}

impl HistoryPersistence for BackgroundWriter {
    fn load(&self) -> Result<Vec<ClipItem>> {
        self.inner.load()
    }

    fn save(&self, items: &[ClipItem]) -> Result<()> {
        match &self.tx {
            Some(tx) => tx
                .send(WriterCommand::Save(items.to_vec()))
                .map_err(|_| HistoryError::WorkerStopped),
            // No worker thread: write inline
            None => self.inner.save(items),
        }
    }

    fn flush(&self) -> Result<()> {
        let Some(tx) = &self.tx else {
            return self.inner.flush();
        };

        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        tx.send(WriterCommand::Flush(ack_tx))
            .map_err(|_| HistoryError::WorkerStopped)?;
        ack_rx.recv().map_err(|_| HistoryError::WorkerStopped)?;
        self.inner.flush()
    }
}

impl Drop for BackgroundWriter {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain what's queued and exit
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
