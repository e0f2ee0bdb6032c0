use crate::{abstract_trait::KeyValueStoreTrait, errors::RepositoryError};
use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error, info};

/// Key-value store kept as a single JSON object on disk.
///
/// Writes go to a sibling temp file which is then renamed over the
/// original, so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, RepositoryError> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                error!("❌ Store file {} is not valid JSON: {e}", self.path.display());
                RepositoryError::from(e)
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => {
                error!("❌ Failed to read store file {}: {e}", self.path.display());
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");

        fs::write(&tmp, json).await.map_err(|e| {
            error!("❌ Failed to write {}: {e}", tmp.display());
            RepositoryError::from(e)
        })?;
        fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStoreTrait for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await?;
        debug!("Stored key '{key}' in {}", self.path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        if entries.remove(key).is_some() {
            self.write_all(&entries).await?;
            info!("🗑️ Removed key '{key}' from {}", self.path.display());
        }
        Ok(())
    }
}
