//! File-based session store adapter.
//!
//! The session is stored as pretty JSON in `~/.malajunta/.session.json`.

use async_trait::async_trait;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::models::Session;
use crate::traits::{SessionStore, SessionStoreError};

/// The session directory name.
pub const SESSION_DIR: &str = ".malajunta";

/// The session file name.
pub const SESSION_FILE: &str = ".session.json";

/// File-based session store.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store at the default location under the home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            path: home.join(SESSION_DIR).join(SESSION_FILE),
        })
    }

    /// Create a store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Session>, SessionStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file =
            File::open(&self.path).map_err(|e| SessionStoreError::LoadFailed(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map(Some)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))
    }

    fn write(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))?;
            }
        }
        let file =
            File::create(&self.path).map_err(|e| SessionStoreError::SaveFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, session)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))
    }

    fn remove(&self) -> Result<(), SessionStoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path).map_err(|e| SessionStoreError::ClearFailed(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        self.read()
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        self.write(session)
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        self.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn test_store(temp_dir: &TempDir) -> FileSessionStore {
        FileSessionStore::at(temp_dir.path().join(SESSION_DIR).join(SESSION_FILE))
    }

    fn test_session() -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Some(chrono::Utc::now().timestamp() + 3600),
            user: User {
                id: Uuid::new_v4(),
                email: Some("ana@example.com".to_string()),
                user_metadata: Default::default(),
            },
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_loads_back() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);
        let session = test_session();

        store.save(&session).await.unwrap();
        assert!(store.path().exists());

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn test_clear_removes_file() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);
        store.save(&test_session()).await.unwrap();

        store.clear().await.unwrap();
        assert!(!store.path().exists());
        // Clearing twice is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(SessionStoreError::Serialization(_))));
    }

    #[test]
    fn test_default_path() {
        if let Some(store) = FileSessionStore::new() {
            assert!(store.path().ends_with(".malajunta/.session.json"));
        }
    }
}
