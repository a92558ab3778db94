pub mod chirps;
pub mod models;
pub mod refresh_tokens;
pub mod users;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::db::models::Document;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt database file: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the single JSON document on disk. Cloning shares the lock, so
/// every handle derived from one `open` call serializes against the others.
#[derive(Clone)]
pub struct Db {
    path: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl Db {
    /// Open the store at `path`, creating an empty document if the file is
    /// absent or if `reset` is set. Idempotent otherwise.
    pub fn open(path: &Path, reset: bool) -> StoreResult<Db> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let db = Db {
            path: path.to_path_buf(),
            lock: Arc::new(RwLock::new(())),
        };

        if reset || !db.path.exists() {
            db.save(&Document::default())?;
        }

        Ok(db)
    }

    /// Read and deserialize the whole document under the shared lock.
    ///
    /// `load` and `save` are independent critical sections; a bare
    /// load-mutate-save sequence is open to lost updates. Mutating
    /// operations go through [`Db::update`] instead, which holds the
    /// exclusive lock for the whole round trip.
    pub fn load(&self) -> StoreResult<Document> {
        let _guard = self.lock.read().map_err(|_| StoreError::Poisoned)?;
        self.load_unlocked()
    }

    /// Serialize and overwrite the whole document under the exclusive lock.
    pub fn save(&self, doc: &Document) -> StoreResult<()> {
        let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
        self.save_unlocked(doc)
    }

    /// Run a read-only operation over a freshly loaded snapshot.
    pub(crate) fn read<T>(&self, f: impl FnOnce(&Document) -> StoreResult<T>) -> StoreResult<T> {
        let _guard = self.lock.read().map_err(|_| StoreError::Poisoned)?;
        let doc = self.load_unlocked()?;
        f(&doc)
    }

    /// Run a read-modify-write transaction: the exclusive lock is held
    /// across load, mutation, and save, so concurrent transactions cannot
    /// overwrite each other. If the closure fails nothing is written.
    pub(crate) fn update<T>(
        &self,
        f: impl FnOnce(&mut Document) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
        let mut doc = self.load_unlocked()?;
        let out = f(&mut doc)?;
        self.save_unlocked(&doc)?;
        Ok(out)
    }

    fn load_unlocked(&self) -> StoreResult<Document> {
        let bytes = fs::read(&self.path)?;
        let doc = serde_json::from_slice(&bytes)?;
        Ok(doc)
    }

    fn save_unlocked(&self, doc: &Document) -> StoreResult<()> {
        let bytes = serde_json::to_vec(doc)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}
