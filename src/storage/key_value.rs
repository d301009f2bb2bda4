use std::{
    collections::HashMap,
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Context, Result};
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};
use thiserror::Error;
use tracing::debug;

/// Failures of a store that say something about the stored value rather than the storage
/// itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Value stored under {key:?} is not valid UTF-8 text")]
    NotText { key: String },
}

/// Interface for abstracting the local persistence layer. Values are whole documents stored
/// under a string key, and every `set` replaces the previous value.
pub trait KeyValueStore {
    /// Returns `None` when nothing was ever stored under `key`. A value that can't be read back
    /// as text is reported as [StoreError::NotText].
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Completes only after the value is durable, so a following `get` observes it.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

impl<T: Deref + Sync> KeyValueStore for T
where
    T::Target: KeyValueStore + Sync,
{
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send {
        self.deref().get(key)
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send {
        self.deref().set(key, value)
    }
}

/// The main realization of [KeyValueStore]. Each key is a separate json file inside
/// `storage_dir`.
pub struct FileStore {
    storage_dir: PathBuf,
}

impl FileStore {
    pub fn new(storage_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&storage_dir)?;

        Ok(Self { storage_dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(anyhow!("Illegal storage key {key:?}"));
        }
        Ok(self.storage_dir.join(format!("{key}.json")))
    }

    async fn read_inner(path: &Path) -> std::result::Result<Vec<u8>, std::io::Error> {
        let mut file = File::open(path).await?;
        file.lock_shared()?;
        let mut value = vec![];
        let result = file.read_to_end(&mut value).await;
        file.unlock_async().await?;
        result?;
        Ok(value)
    }

    async fn write_inner(path: &Path, value: &str) -> std::result::Result<(), std::io::Error> {
        let mut file = File::options()
            .write(true)
            .create(true)
            .read(true)
            .truncate(false)
            .open(path)
            .await?;

        // Truncating only after the lock is taken keeps readers from seeing an empty file.
        file.lock_exclusive()?;
        let result = async {
            file.set_len(0).await?;
            file.rewind().await?;
            file.write_all(value.as_bytes()).await?;
            file.flush().await?;
            file.sync_data().await
        }
        .await;
        file.unlock_async().await?;
        result
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        debug!("Reading {path:?}");
        let bytes = match Self::read_inner(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {path:?}")),
        };
        let value = String::from_utf8(bytes).map_err(|_| StoreError::NotText {
            key: key.to_owned(),
        })?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        debug!("Writing {} bytes into {path:?}", value.len());
        Self::write_inner(&path, value)
            .await
            .with_context(|| format!("Failed to write {path:?}"))
    }
}

/// Keeps values in memory. Used for tests and for callers that don't need persistence.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow!("Memory store lock was poisoned"))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("Memory store lock was poisoned"))?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use tempfile::tempdir;

    use super::{FileStore, KeyValueStore, MemoryStore, StoreError};

    #[tokio::test]
    async fn test_file_store_missing_key() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path().to_owned())?;

        assert_eq!(store.get("moodHistory").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_store_overwrite() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path().join("nested"))?;

        store.set("moodHistory", "[1,2,3,4,5,6,7,8]").await?;
        store.set("moodHistory", "[]").await?;

        assert_eq!(store.get("moodHistory").await?.as_deref(), Some("[]"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("nested/moodHistory.json"))?,
            "[]"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() -> Result<()> {
        let dir = tempdir()?;
        FileStore::new(dir.path().to_owned())?
            .set("theme", "\"dark\"")
            .await?;

        let reopened = FileStore::new(dir.path().to_owned())?;
        assert_eq!(reopened.get("theme").await?.as_deref(), Some("\"dark\""));
        Ok(())
    }

    #[tokio::test]
    async fn test_file_store_rejects_paths() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path().to_owned())?;

        assert!(store.set("../escape", "x").await.is_err());
        assert!(store.get("").await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_file_store_binary_value_is_not_text() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path().to_owned())?;
        std::fs::write(dir.path().join("moodHistory.json"), [0xff, 0xfe, b'[', b']'])?;

        let error = store.get("moodHistory").await.unwrap_err();
        assert_eq!(
            error.downcast_ref::<StoreError>(),
            Some(&StoreError::NotText {
                key: "moodHistory".into()
            })
        );

        // The broken value can still be replaced.
        store.set("moodHistory", "[]").await?;
        assert_eq!(store.get("moodHistory").await?.as_deref(), Some("[]"));
        Ok(())
    }

    #[tokio::test]
    async fn test_memory_store_through_arc() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        let shared = store.clone();

        shared.set("moodHistory", "[]").await?;

        assert_eq!(store.get("moodHistory").await?.as_deref(), Some("[]"));
        assert_eq!(store.get("other").await?, None);
        Ok(())
    }
}
