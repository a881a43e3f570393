use async_trait::async_trait;
use ::s3::creds::Credentials;
use ::s3::{Bucket, Region};
use tracing::debug;

use super::error::StorageError;
use super::key::validate_key;
use super::traits::{ObjectEntry, ObjectStore, UploadOptions};
use crate::config::S3Config;

/// S3-compatible object store (AWS, MinIO, Supabase storage, ...).
///
/// `upsert` is not enforced: S3 `PutObject` always replaces. Cache control is
/// applied by the serving layer rather than stored as object metadata.
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    max_size: u64,
}

impl S3ObjectStore {
    pub fn new(config: &S3Config, max_size: u64) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse()
                .map_err(|e| StorageError::Backend(format!("invalid region: {e}")))?,
        };

        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("invalid credentials: {e}")))?;

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Backend(e.to_string()))?
            .with_path_style();

        Ok(Self { bucket, max_size })
    }
}

fn backend(err: ::s3::error::S3Error) -> StorageError {
    StorageError::Backend(err.to_string())
}

fn check_status(key: &str, status: u16) -> Result<(), StorageError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(StorageError::NotFound(key.to_string())),
        other => Err(StorageError::Backend(format!(
            "unexpected status {other} for {key}"
        ))),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        key: &str,
        data: &[u8],
        options: &UploadOptions,
    ) -> Result<(), StorageError> {
        validate_key(key)?;
        StorageError::check_size(data.len(), self.max_size)?;
        let response = self
            .bucket
            .put_object_with_content_type(key, data, &options.content_type)
            .await
            .map_err(backend)?;
        check_status(key, response.status_code())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectEntry>, StorageError> {
        let pages = self
            .bucket
            .list(prefix.to_string(), None)
            .await
            .map_err(backend)?;

        let mut entries: Vec<ObjectEntry> = pages
            .into_iter()
            .flat_map(|page| page.contents)
            .filter_map(|object| {
                object.key.strip_prefix(prefix).map(|name| ObjectEntry {
                    name: name.to_string(),
                })
            })
            .collect();
        entries.sort();
        Ok(entries)
    }

    async fn remove(&self, keys: &[String]) -> Result<(), StorageError> {
        for key in keys {
            let response = self.bucket.delete_object(key).await.map_err(backend)?;
            match check_status(key, response.status_code()) {
                Ok(()) | Err(StorageError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
            debug!(key = %key, "Removed object");
        }
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        validate_key(key)?;
        let response = self.bucket.get_object(key).await.map_err(backend)?;
        check_status(key, response.status_code())?;
        Ok(response.bytes().to_vec())
    }
}
