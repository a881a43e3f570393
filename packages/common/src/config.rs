use std::path::PathBuf;

use serde::Deserialize;

/// Which object store backend to use.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Filesystem,
    Memory,
    S3,
}

/// Connection settings for an S3-compatible bucket.
#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    pub bucket: String,
    /// AWS region name, or the signing region of a custom endpoint.
    #[serde(default = "default_s3_region")]
    pub region: String,
    /// Custom endpoint URL (MinIO, Supabase, ...). Path-style addressing is used.
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

fn default_s3_region() -> String {
    "us-east-1".into()
}

/// App-level object storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Default: filesystem.
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    /// Base directory for the filesystem backend. Default: "./data/objects".
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Largest single object accepted, in bytes. Default: 10 MiB.
    #[serde(default = "default_max_object_size")]
    pub max_object_size: u64,
    /// Required when `backend = "s3"`.
    #[serde(default)]
    pub s3: Option<S3Config>,
}

fn default_backend() -> StorageBackend {
    StorageBackend::Filesystem
}
fn default_path() -> PathBuf {
    PathBuf::from("./data/objects")
}
fn default_max_object_size() -> u64 {
    10 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_path(),
            max_object_size: default_max_object_size(),
            s3: None,
        }
    }
}
