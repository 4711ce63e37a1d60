//! Session persistence.
//!
//! Only the session survives between runs; carts are always re-fetched.

use std::{fs, io, path::PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

use crate::auth::Session;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("could not access session file")]
    Io(#[from] io::Error),

    #[error("session file is corrupt")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `session.json` in the platform config directory, or the working
    /// directory when none can be determined.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("com", "pizzeria", "pizzeria").map_or_else(
            || PathBuf::from("session.json"),
            |dirs| dirs.config_dir().join("session.json"),
        )
    }

    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Persist a session, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;

        debug!(path = %self.path.display(), "session saved");

        Ok(())
    }

    /// Forget the stored session. Missing files are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::session;

    use super::*;

    #[test]
    fn save_then_load_returns_same_session() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::new(dir.path().join("nested/session.json"));

        store.save(&session())?;

        assert_eq!(store.load()?, Some(session()));

        Ok(())
    }

    #[test]
    fn missing_file_loads_nothing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::new(dir.path().join("session.json"));

        assert_eq!(store.load()?, None);

        Ok(())
    }

    #[test]
    fn clear_removes_session_and_tolerates_repeat() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::new(dir.path().join("session.json"));

        store.save(&session())?;
        store.clear()?;
        store.clear()?;

        assert_eq!(store.load()?, None);

        Ok(())
    }

    #[test]
    fn corrupt_file_is_reported() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json")?;

        let result = SessionStore::new(path).load();

        assert!(
            matches!(result, Err(SessionStoreError::Json(_))),
            "expected json error, got {result:?}"
        );

        Ok(())
    }
}
