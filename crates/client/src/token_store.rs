//! Persistent key/value storage for the auth token.
//!
//! Values live in a single JSON object file. The token is stored under
//! [`TOKEN_KEY`]; a missing file or key means the client runs
//! unauthenticated.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::context::Credentials;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "shelflifeToken";

/// Errors from reading or writing the storage file.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file {path} is not a JSON object: {message}")]
    Format { path: PathBuf, message: String },
}

/// File-backed key/value store.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. Blank values count as absent.
    pub fn load_token(&self) -> Result<Option<String>, TokenStoreError> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string))
    }

    /// Credentials for the stored token, anonymous when there is none.
    pub fn credentials(&self) -> Result<Credentials, TokenStoreError> {
        Ok(Credentials::from_token(self.load_token()?))
    }

    /// Persist `token`, keeping any other keys in the file.
    pub fn save_token(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.trim().to_string()));
        self.write_entries(&entries)?;
        tracing::info!(path = %self.path.display(), "Stored auth token");
        Ok(())
    }

    /// Remove the token. Succeeds when there was nothing to remove.
    pub fn clear_token(&self) -> Result<(), TokenStoreError> {
        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
            tracing::info!(path = %self.path.display(), "Cleared auth token");
        }
        Ok(())
    }

    fn read_entries(&self) -> Result<Map<String, Value>, TokenStoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(self.format_error(format!("found {other}"))),
            Err(e) => Err(self.format_error(e.to_string())),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| self.format_error(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> TokenStoreError {
        TokenStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn format_error(&self, message: String) -> TokenStoreError {
        TokenStoreError::Format {
            path: self.path.clone(),
            message,
        }
    }
}
