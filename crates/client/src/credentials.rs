//! Persistent credential storage.
//!
//! The browser keeps the bearer token in local storage under a fixed
//! key; this is the same contract as a small JSON document on disk. An
//! absent token is an unauthenticated state, not an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use breadfruit_core::AccessToken;

/// Fixed storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Errors reading or writing credential storage.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Storage for the session's opaque bearer credential.
pub trait CredentialStore {
    /// Read the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` if the backing storage cannot be read.
    fn load(&self) -> Result<Option<AccessToken>, CredentialError>;

    /// Persist a token under the fixed key, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` if the backing storage cannot be written.
    fn store(&self, token: &AccessToken) -> Result<(), CredentialError>;

    /// Remove the stored token (logout, or rejection by the server).
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` if the backing storage cannot be written.
    fn clear(&self) -> Result<(), CredentialError>;
}

/// File-backed credential store: a JSON object keyed by [`TOKEN_KEY`].
#[derive(Debug, Clone)]
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    /// Create a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>, CredentialError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentials {
    fn load(&self) -> Result<Option<AccessToken>, CredentialError> {
        let map = self.read_map()?;
        Ok(map.get(TOKEN_KEY).map(AccessToken::new))
    }

    fn store(&self, token: &AccessToken) -> Result<(), CredentialError> {
        let mut map = self.read_map()?;
        map.insert(TOKEN_KEY.to_string(), token.as_str().to_string());
        self.write_map(&map)
    }

    fn clear(&self) -> Result<(), CredentialError> {
        let mut map = self.read_map()?;
        if map.remove(TOKEN_KEY).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-memory credential store, for tests and embedded use.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentials {
    slot: Arc<Mutex<Option<AccessToken>>>,
}

impl MemoryCredentials {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with a token.
    #[must_use]
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token))),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn load(&self) -> Result<Option<AccessToken>, CredentialError> {
        Ok(self.slot.lock().map_or(None, |slot| slot.clone()))
    }

    fn store(&self, token: &AccessToken) -> Result<(), CredentialError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}
