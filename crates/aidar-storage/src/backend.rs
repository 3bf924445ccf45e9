use std::collections::BTreeMap;
use std::future::Future;

use tokio::sync::RwLock;

use crate::error::StorageError;

/// Raw JSON document storage addressed by object key.
pub trait Backend: Send + Sync {
    /// Fetch one document, or `StorageError::NotFound`.
    fn get_json(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<serde_json::Value, StorageError>> + Send;

    /// Write one document, replacing any previous version.
    fn put_json(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete one document. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// List every key under a prefix.
    fn list_keys(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<String>, StorageError>> + Send;
}

/// Process-local backend. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    objects: RwLock<BTreeMap<String, serde_json::Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    async fn get_json(&self, key: &str) -> Result<serde_json::Value, StorageError> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    async fn put_json(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        self.objects
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .objects
            .read()
            .await
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
