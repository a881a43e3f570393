mod error;
mod hash;
mod key;
mod traits;

pub mod filesystem;
pub mod memory;
#[cfg(feature = "object-storage")]
pub mod s3;

use std::sync::Arc;

pub use error::StorageError;
pub use hash::ContentHash;
pub use key::{SitePrefix, validate_key};
pub use traits::{ObjectEntry, ObjectStore, UploadOptions};

use crate::config::{StorageBackend, StorageConfig};

/// Open the object store selected by `config`.
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config.backend {
        StorageBackend::Filesystem => {
            let store =
                filesystem::FilesystemObjectStore::new(config.path.clone(), config.max_object_size)
                    .await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => Ok(Arc::new(memory::InMemoryObjectStore::with_max_size(
            config.max_object_size,
        ))),
        #[cfg(feature = "object-storage")]
        StorageBackend::S3 => {
            let s3_config = config.s3.as_ref().ok_or_else(|| {
                StorageError::Backend("storage.s3 must be set for the s3 backend".into())
            })?;
            Ok(Arc::new(s3::S3ObjectStore::new(
                s3_config,
                config.max_object_size,
            )?))
        }
        #[cfg(not(feature = "object-storage"))]
        StorageBackend::S3 => Err(StorageError::Backend(
            "built without the object-storage feature".into(),
        )),
    }
}
