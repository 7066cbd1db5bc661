//! Persisted login session
//!
//! A small key/value file holding the bearer token under `auth_token` and
//! the serialized user under `auth_user`. Both keys are present or neither.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bookfair_core::User;
use tracing::{debug, warn};

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Restored session contents
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

/// File-backed key/value session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    /// Current contents, with a corrupt file read as empty
    fn read_or_reset(&self) -> Result<BTreeMap<String, String>> {
        match self.read_all() {
            Err(SessionError::Corrupt(e)) => {
                warn!(error = %e, "Replacing corrupt session file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_or_reset()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.read_or_reset()?;
        if items.remove(key).is_some() || items.is_empty() {
            self.write_all(&items)?;
        }
        Ok(())
    }

    /// Persist token and user together
    pub fn save(&self, token: &str, user: &User) -> Result<()> {
        self.set_item(TOKEN_KEY, token)?;
        self.set_item(USER_KEY, &serde_json::to_string(user)?)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Restore a saved session.
    ///
    /// A missing key or an unparseable user clears both keys and yields `None`.
    pub fn load(&self) -> Result<Option<StoredSession>> {
        let (token, user) = match (self.get_item(TOKEN_KEY), self.get_item(USER_KEY)) {
            (Ok(token), Ok(user)) => (token, user),
            (Err(SessionError::Io(e)), _) | (_, Err(SessionError::Io(e))) => {
                return Err(e.into())
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Discarding corrupt session file");
                self.clear()?;
                return Ok(None);
            }
        };

        let (Some(token), Some(user)) = (&token, &user) else {
            if token.is_some() || user.is_some() {
                self.clear()?;
            }
            return Ok(None);
        };

        match serde_json::from_str::<User>(user) {
            Ok(user) => Ok(Some(StoredSession {
                token: token.clone(),
                user,
            })),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable stored user");
                self.clear()?;
                Ok(None)
            }
        }
    }

    pub fn clear(&self) -> Result<()> {
        self.remove_item(TOKEN_KEY)?;
        self.remove_item(USER_KEY)
    }
}
