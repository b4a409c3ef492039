//! File-backed store for the [`Document`].
//!
//! The store owns the in-memory document behind one async mutex. Every
//! file read and write happens while that mutex is held, so saves never
//! interleave with each other or with a load. Handlers that need a
//! read-modify-write cycle take the lock with [`DocumentStore::lock`] and
//! persist through the returned [`StoreGuard`] before releasing it.
//!
//! I/O failures are logged and swallowed: the store always keeps its
//! best-known in-memory state and the next successful save repairs the
//! file.

use std::io::ErrorKind;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::document::Document;
use crate::error::{StoreError, StoreResult};

/// What [`DocumentStore::load`] found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// An existing file was parsed successfully.
    Loaded,
    /// No file existed; an empty document was written out.
    Created,
    /// The file could not be read or parsed, or a missing file could not
    /// be created; the store fell back to an empty document.
    Recovered,
}

/// Owns the plugin document and its backing JSON file.
#[derive(Debug)]
pub struct DocumentStore {
    path: PathBuf,
    document: Mutex<Document>,
}

impl DocumentStore {
    /// Create a store for `path` holding an empty document. Nothing is read
    /// until [`load`](Self::load) is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: Mutex::new(Document::new()),
        }
    }

    /// Create a store for `path` and load it immediately.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self::new(path);
        store.load().await;
        store
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory document with the file's contents.
    ///
    /// A missing file is established by writing the empty document. An
    /// unreadable or malformed file is logged and replaced in memory by an
    /// empty document; the file itself is left alone until the next save.
    pub async fn load(&self) -> LoadOutcome {
        let mut document = self.document.lock().await;
        match read_document(&self.path).await {
            Ok(Some(loaded)) => {
                debug!(
                    path = %self.path.display(),
                    signin = loaded.signin.len(),
                    fortune = loaded.fortune.len(),
                    "loaded plugin data"
                );
                *document = loaded;
                LoadOutcome::Loaded
            }
            Ok(None) => {
                *document = Document::new();
                match write_document(&self.path, &document).await {
                    Ok(()) => {
                        info!(path = %self.path.display(), "created plugin data file");
                        LoadOutcome::Created
                    }
                    Err(e) => {
                        error!("failed to create plugin data file: {e}");
                        LoadOutcome::Recovered
                    }
                }
            }
            Err(e) => {
                error!("failed to load plugin data: {e}");
                warn!("continuing with empty plugin data");
                *document = Document::new();
                LoadOutcome::Recovered
            }
        }
    }

    /// Write the current document to disk.
    pub async fn save(&self) -> StoreResult<()> {
        let document = self.document.lock().await;
        write_document(&self.path, &document).await
    }

    /// Write the current document to disk, logging any failure.
    ///
    /// Returns whether the write succeeded.
    pub async fn persist(&self) -> bool {
        self.lock().await.persist().await
    }

    /// Take exclusive access to the document for a read-modify-write cycle.
    pub async fn lock(&self) -> StoreGuard<'_> {
        StoreGuard {
            path: &self.path,
            document: self.document.lock().await,
        }
    }

    /// A copy of the current in-memory document.
    pub async fn snapshot(&self) -> Document {
        self.document.lock().await.clone()
    }
}

/// Exclusive access to the store's document.
///
/// Dereferences to [`Document`]. Saving through the guard writes the
/// document while the lock is still held.
pub struct StoreGuard<'a> {
    path: &'a Path,
    document: MutexGuard<'a, Document>,
}

impl StoreGuard<'_> {
    /// Write the guarded document to disk.
    pub async fn save(&self) -> StoreResult<()> {
        write_document(self.path, &self.document).await
    }

    /// Write the guarded document to disk, logging any failure.
    pub async fn persist(&self) -> bool {
        match self.save().await {
            Ok(()) => true,
            Err(e) => {
                error!("failed to save plugin data: {e}");
                false
            }
        }
    }
}

impl Deref for StoreGuard<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.document
    }
}

impl DerefMut for StoreGuard<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

/// Read and parse the document at `path`. `Ok(None)` means no file.
async fn read_document(path: &Path) -> StoreResult<Option<Document>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize `document` and replace the file at `path` with it.
///
/// Writes a sibling `.tmp` file first and renames it over the target so
/// readers never observe a half-written document.
async fn write_document(path: &Path, document: &Document) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(document).map_err(StoreError::Serialize)?;
    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, json)
        .await
        .map_err(|e| StoreError::io(&tmp_path, e))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| StoreError::io(path, e))
}
