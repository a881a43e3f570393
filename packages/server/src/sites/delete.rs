use common::storage::SitePrefix;
use tracing::{info, instrument, warn};

use super::{Owner, SiteError, SiteService, naming};

/// What a deletion actually removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOutcome {
    pub removed_files: usize,
    pub record_deleted: bool,
}

impl SiteService<'_> {
    /// Remove every stored file and the record of a website owned by `owner`.
    ///
    /// Only objects under the owner's own prefix and a record matching both id
    /// and owner are touched, so a request by anyone else is a no-op. Deleting
    /// an already deleted website succeeds.
    #[instrument(skip(self, owner), fields(owner = %owner.id()))]
    pub async fn delete(
        &self,
        owner: &Owner,
        website_id: &str,
    ) -> Result<DeleteOutcome, SiteError> {
        if !naming::is_valid_website_id(website_id) {
            return Ok(DeleteOutcome::default());
        }

        let prefix = SitePrefix::new(owner.id(), website_id)?;
        let keys: Vec<String> = self
            .objects
            .list(prefix.as_str())
            .await?
            .into_iter()
            .map(|entry| prefix.key(&entry.name))
            .collect();

        if !keys.is_empty() {
            self.objects.remove(&keys).await?;
        }

        let record_deleted = self.metadata.delete(website_id, owner.id()).await? > 0;
        let outcome = DeleteOutcome {
            removed_files: keys.len(),
            record_deleted,
        };

        if record_deleted {
            info!(removed_files = outcome.removed_files, "Website deleted");
        } else {
            warn!(
                removed_files = outcome.removed_files,
                "No website record matched id and owner"
            );
        }

        Ok(outcome)
    }
}
