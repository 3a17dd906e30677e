//! Scoped key-value persistence.
//!
//! The app persists a handful of JSON-serialized strings under fixed keys
//! (auth snapshot, onboarding progress, preferences). The store itself is
//! a collaborator behind a trait; the default implementation keeps one
//! file per key under ~/.breakwell/store/.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{ClientError, Result};

/// Fixed storage keys.
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const USER: &str = "user";
    pub const ONBOARDING_STATE: &str = "onboardingState";
    pub const PREFERENCES: &str = "userPreferences";
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Remove the session-scoped keys, leaving preferences intact.
pub async fn clear_session(store: &dyn KeyValueStore) -> Result<()> {
    for key in [keys::AUTH_TOKEN, keys::USER, keys::ONBOARDING_STATE] {
        store.remove(key).await?;
    }
    Ok(())
}

/// File-per-key store rooted at a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store under the default location (~/.breakwell/store).
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(crate::config::state_dir()?.join("store")))
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys are fixed identifiers; anything path-like is rejected.
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ClientError::Storage(format!("invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Storage(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            ClientError::Storage(format!("failed to create store dir: {}", e))
        })?;
        tokio::fs::write(&path, value).await.map_err(|e| {
            ClientError::Storage(format!("failed to write {}: {}", path.display(), e))
        })
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(format!(
                "failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let (_dir, store) = temp_store();
        store.set(keys::AUTH_TOKEN, "tok_123").await.unwrap();
        assert_eq!(
            store.get(keys::AUTH_TOKEN).await.unwrap().as_deref(),
            Some("tok_123")
        );
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get(keys::USER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (_dir, store) = temp_store();
        store.set(keys::USER, "{}").await.unwrap();
        store.remove(keys::USER).await.unwrap();
        store.remove(keys::USER).await.unwrap();
        assert_eq!(store.get(keys::USER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_session_keeps_preferences() {
        let (_dir, store) = temp_store();
        store.set(keys::AUTH_TOKEN, "tok").await.unwrap();
        store.set(keys::USER, "{}").await.unwrap();
        store.set(keys::ONBOARDING_STATE, "{}").await.unwrap();
        store.set(keys::PREFERENCES, r#"{"theme":"light"}"#).await.unwrap();

        clear_session(&store).await.unwrap();

        assert_eq!(store.get(keys::AUTH_TOKEN).await.unwrap(), None);
        assert_eq!(store.get(keys::USER).await.unwrap(), None);
        assert_eq!(store.get(keys::ONBOARDING_STATE).await.unwrap(), None);
        assert!(store.get(keys::PREFERENCES).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_path_like_key_rejected() {
        let (_dir, store) = temp_store();
        assert!(store.get("../escape").await.is_err());
        assert!(store.set("a/b", "x").await.is_err());
    }
}
