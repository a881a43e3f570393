use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StorageError;
use super::key::validate_key;
use super::traits::{ObjectEntry, ObjectStore, UploadOptions};

/// An object held by [`InMemoryObjectStore`], with the options it was uploaded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub options: UploadOptions,
}

/// `BTreeMap`-backed object store for tests and local development.
///
/// Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<BTreeMap<String, StoredObject>>,
    max_size: Option<u64>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects objects larger than `max_size` bytes.
    pub fn with_max_size(max_size: u64) -> Self {
        Self {
            max_size: Some(max_size),
            ..Self::default()
        }
    }

    /// Number of objects currently stored.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Look up an object together with its upload options.
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// All keys, in lexicographic order.
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload(
        &self,
        key: &str,
        data: &[u8],
        options: &UploadOptions,
    ) -> Result<(), StorageError> {
        validate_key(key)?;
        if let Some(limit) = self.max_size {
            StorageError::check_size(data.len(), limit)?;
        }
        let mut objects = self.objects.write().await;
        if !options.upsert && objects.contains_key(key) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        objects.insert(
            key.to_string(),
            StoredObject {
                data: data.to_vec(),
                options: options.clone(),
            },
        );
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectEntry>, StorageError> {
        let objects = self.objects.read().await;
        Ok(objects
            .range(prefix.to_string()..)
            .map_while(|(key, _)| key.strip_prefix(prefix))
            .map(|name| ObjectEntry {
                name: name.to_string(),
            })
            .collect())
    }

    async fn remove(&self, keys: &[String]) -> Result<(), StorageError> {
        let mut objects = self.objects.write().await;
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|obj| obj.data.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}
