use chrono::Utc;
use common::content_type_for_path;
use common::storage::{SitePrefix, UploadOptions};
use futures::future::join_all;
use tracing::{error, info, instrument, warn};

use super::{CACHE_CONTROL, Owner, SiteError, SiteService, naming};
use crate::entity::website;

/// How many ids to try before giving up on finding an unused one.
const MAX_ID_ATTEMPTS: u32 = 5;

/// One uploaded file, addressed by its path relative to the website root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFile {
    pub path: String,
    pub data: Vec<u8>,
}

impl SiteService<'_> {
    /// Store every file of a new website and create its record.
    ///
    /// Uploads run concurrently and all of them settle before the outcome is
    /// decided. On any failure the objects written by this call are removed
    /// again (best-effort) and the first failure in input order is returned.
    #[instrument(skip(self, owner, files), fields(owner = %owner.id(), files = files.len()))]
    pub async fn ingest(
        &self,
        owner: &Owner,
        files: &[SiteFile],
    ) -> Result<website::Model, SiteError> {
        let first = files
            .first()
            .ok_or_else(|| SiteError::Validation("At least one file is required".into()))?;

        let website_id = self.allocate_id().await?;
        let name = naming::derive_name(&first.path);
        let prefix = SitePrefix::new(owner.id(), &website_id)?;

        let uploads = files.iter().map(|file| {
            let key = prefix.key(&file.path);
            let options = UploadOptions::new(content_type_for_path(&file.path))
                .cache_control(CACHE_CONTROL)
                .upsert(true);
            async move {
                let result = self.objects.upload(&key, &file.data, &options).await;
                (key, result)
            }
        });

        let mut written = Vec::with_capacity(files.len());
        let mut failure = None;
        for (key, result) in join_all(uploads).await {
            match result {
                Ok(()) => written.push(key),
                Err(source) => {
                    warn!(key = %key, error = %source, "Upload failed");
                    failure.get_or_insert(SiteError::Upload { key, source });
                }
            }
        }

        if let Some(err) = failure {
            self.compensate(&written).await;
            return Err(err);
        }

        let record = website::Model {
            url: naming::website_url(&website_id),
            id: website_id,
            owner_id: owner.id().to_string(),
            name,
            created_at: Utc::now(),
        };

        match self.metadata.insert(record).await {
            Ok(saved) => {
                info!(website_id = %saved.id, files = written.len(), "Website ingested");
                Ok(saved)
            }
            Err(e) => {
                self.compensate(&written).await;
                Err(e.into())
            }
        }
    }

    async fn allocate_id(&self) -> Result<String, SiteError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = naming::generate_website_id();
            if self.metadata.find(&id).await?.is_none() {
                return Ok(id);
            }
            warn!(website_id = %id, "Generated website id is taken, retrying");
        }
        Err(SiteError::IdExhausted(MAX_ID_ATTEMPTS))
    }

    /// Remove exactly the objects written by a failed ingestion.
    async fn compensate(&self, written: &[String]) {
        if written.is_empty() {
            return;
        }
        // Best effort.
        if let Err(e) = self.objects.remove(written).await {
            error!(error = %e, objects = written.len(), "Cleanup after failed ingestion failed");
        }
    }
}
