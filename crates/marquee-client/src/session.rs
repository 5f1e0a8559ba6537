//! Authentication session and its durable storage.
//!
//! # Design
//! - One owned [`SessionStore`] is passed by reference to every controller.
//! - `set` and `clear` are the only mutators and write through to storage
//!   before returning.
//! - Restoration runs once; unreadable state degrades to logged out.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Storage key holding the serialised token.
pub const SESSION_KEY: &str = "jwt";

/// Failures while persisting or reading the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// File system operation failed.
    #[error("session storage {operation} failed for {}", path.display())]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the operation.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// In-memory storage lock was poisoned by a panicking writer.
    #[error("session storage lock poisoned")]
    Poisoned,
    /// Persisted value was not a JSON string.
    #[error("persisted session value is malformed")]
    Malformed {
        /// Decode error detail.
        source: serde_json::Error,
    },
    /// Tokens must carry at least one non-whitespace character.
    #[error("refusing to store an empty session token")]
    EmptyToken,
}

/// Durable key/value storage for raw serialised values.
pub trait SessionStorage: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Replace the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be written.
    fn store(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Delete `key`; deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be modified.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of this storage.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SessionError::Io {
                operation: "read",
                path,
                source,
            }),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir).map_err(|source| SessionError::Io {
            operation: "create_dir",
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&staging, value).map_err(|source| SessionError::Io {
            operation: "write",
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| SessionError::Io {
            operation: "rename",
            path,
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io {
                operation: "remove",
                path,
                source,
            }),
        }
    }
}

/// Process-local storage. Clones share the same map, which lets tests
/// simulate a reload by restoring a second store from a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Current authentication token plus its durable copy.
pub struct SessionStore {
    token: Option<String>,
    storage: Box<dyn SessionStorage>,
    restored: bool,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.token.is_some())
            .field("restored", &self.restored)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Unauthenticated store backed by `storage`; nothing is read yet.
    #[must_use]
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            token: None,
            storage: Box::new(storage),
            restored: false,
        }
    }

    /// Build a store and immediately run [`SessionStore::restore`].
    #[must_use]
    pub fn restored(storage: impl SessionStorage + 'static) -> Self {
        let mut store = Self::new(storage);
        store.restore();
        store
    }

    /// Hydrate the in-memory token from storage.
    ///
    /// Runs at most once and never overwrites a token already held in
    /// memory. Read or parse failures leave the session logged out.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if self.token.is_some() {
            return;
        }
        match self.load_token() {
            Ok(Some(token)) => {
                tracing::debug!("restored persisted session");
                self.token = Some(token);
            }
            Ok(None) => tracing::debug!("no persisted session"),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable persisted session");
            }
        }
    }

    fn load_token(&self) -> Result<Option<String>, SessionError> {
        let Some(raw) = self.storage.load(SESSION_KEY)? else {
            return Ok(None);
        };
        let token: String =
            serde_json::from_str(&raw).map_err(|source| SessionError::Malformed { source })?;
        Ok(Some(token).filter(|token| !token.trim().is_empty()))
    }

    /// Current token, `None` when logged out.
    #[must_use]
    pub fn read(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Persist `token` and make it current.
    ///
    /// Storage is written first; on failure the in-memory value is left
    /// untouched so both copies still agree.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`] for blank tokens or the storage error.
    pub fn set(&mut self, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        let raw = serde_json::to_string(&token)
            .map_err(|source| SessionError::Malformed { source })?;
        self.storage.store(SESSION_KEY, &raw)?;
        self.token = Some(token);
        tracing::info!("session established");
        Ok(())
    }

    /// Drop the token from storage, then from memory.
    ///
    /// On a storage failure the in-memory token is kept, so both copies
    /// still agree and the caller can retry.
    ///
    /// # Errors
    ///
    /// Returns the storage error, if any.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.storage.remove(SESSION_KEY)?;
        self.token = None;
        tracing::info!("session cleared");
        Ok(())
    }
}
