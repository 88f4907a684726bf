//! Session Store
//!
//! Holds the opaque admin token in durable client storage. The session is an
//! explicit object handed to the views; nothing reads the storage directly.

use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

/// Storage key for the admin token
pub const TOKEN_KEY: &str = "admin_token";

/// Session storage errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Refused to persist an empty token
    #[error("Refusing to store an empty session token")]
    EmptyToken,

    /// Backend not available (no browser storage, no data directory)
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be read back
    #[error("Corrupt session data: {0}")]
    Corrupt(String),
}

/// Durable key/value backend for the session
pub trait TokenStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn store(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Authentication session backed by a [`TokenStore`]
pub struct Session<S> {
    store: S,
    key: String,
}

impl<S: TokenStore> Session<S> {
    /// Create a session using the default key
    pub fn new(store: S) -> Self {
        Self::with_key(store, TOKEN_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Current token, if any.
    ///
    /// A storage failure reads as "logged out".
    pub fn get_token(&self) -> Option<String> {
        match self.store.load(&self.key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(key = %self.key, "Failed to read session token: {}", e);
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        self.store.store(&self.key, token)?;
        tracing::debug!(key = %self.key, "Session token stored");
        Ok(())
    }

    pub fn clear_token(&self) -> Result<(), SessionError> {
        self.store.remove(&self.key)?;
        tracing::debug!(key = %self.key, "Session token cleared");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// In-memory store; lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file_store::FileStore;

#[cfg(feature = "native")]
mod file_store {
    use super::{SessionError, TokenStore};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    /// JSON map on disk, e.g. `~/.local/share/fame-gallery/session.json`
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> Result<HashMap<String, String>, SessionError> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
                Ok(content) => serde_json::from_str(&content)
                    .map_err(|e| SessionError::Corrupt(format!("{}: {}", self.path.display(), e))),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
                Err(e) => Err(SessionError::Io(e)),
            }
        }

        fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), SessionError> {
            if entries.is_empty() {
                return match std::fs::remove_file(&self.path) {
                    Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(SessionError::Io(e)),
                    _ => Ok(()),
                };
            }

            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let content = serde_json::to_string_pretty(entries)
                .map_err(|e| SessionError::Corrupt(e.to_string()))?;

            // Atomic replace
            let tmp = self.path.with_extension("json.tmp");
            std::fs::write(&tmp, content)?;
            std::fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    impl TokenStore for FileStore {
        fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
            Ok(self.read_all()?.remove(key))
        }

        fn store(&self, key: &str, value: &str) -> Result<(), SessionError> {
            let mut entries = self.read_all()?;
            entries.insert(key.to_string(), value.to_string());
            self.write_all(&entries)
        }

        fn remove(&self, key: &str) -> Result<(), SessionError> {
            let mut entries = self.read_all()?;
            if entries.remove(key).is_some() {
                self.write_all(&entries)?;
            }
            Ok(())
        }
    }
}
