use common::content_type_for_path;
use tracing::instrument;

use super::{SiteError, SiteService};

/// Raw bytes of one website file and the content type it is served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub data: Vec<u8>,
    pub content_type: &'static str,
}

impl SiteService<'_> {
    /// Fetch any file of a website by its path relative to the website root.
    #[instrument(skip(self))]
    pub async fn resolve(&self, website_id: &str, path: &str) -> Result<Resource, SiteError> {
        let data = self.fetch(website_id, path).await?;
        Ok(Resource {
            data,
            content_type: content_type_for_path(path),
        })
    }
}
