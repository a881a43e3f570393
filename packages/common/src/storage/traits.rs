use async_trait::async_trait;

use super::error::StorageError;

/// Options applied to a single upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// MIME type recorded with the object.
    pub content_type: String,
    /// `Cache-Control` directive recorded with the object.
    pub cache_control: Option<String>,
    /// Whether an existing object under the same key may be replaced.
    pub upsert: bool,
}

impl UploadOptions {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            cache_control: None,
            upsert: false,
        }
    }

    pub fn cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }

    pub fn upsert(mut self, upsert: bool) -> Self {
        self.upsert = upsert;
        self
    }
}

/// One object found by [`ObjectStore::list`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjectEntry {
    /// Key relative to the listed prefix.
    pub name: String,
}

/// Key-addressed blob storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes under `key`.
    async fn upload(
        &self,
        key: &str,
        data: &[u8],
        options: &UploadOptions,
    ) -> Result<(), StorageError>;

    /// List every object whose key starts with `prefix`, recursively.
    ///
    /// An absent prefix yields an empty list.
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectEntry>, StorageError>;

    /// Remove the given keys. Keys that do not exist are ignored.
    async fn remove(&self, keys: &[String]) -> Result<(), StorageError>;

    /// Retrieve all bytes stored under `key`.
    async fn download(&self, key: &str) -> Result<Vec<u8>, StorageError>;
}
