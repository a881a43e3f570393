//! Site ingestion and resolution.
//!
//! A website is a set of immutable objects under
//! `websites/{owner_id}/{website_id}/` plus one metadata row. [`SiteService`]
//! borrows both store handles and implements ingestion, deletion, rendering of
//! the root document and resolution of sub-resources on top of them.

mod delete;
mod error;
mod ingest;
pub mod metadata;
pub mod naming;
mod render;
mod resolve;

use common::storage::{ObjectStore, SitePrefix, validate_key};
use tracing::instrument;

use crate::entity::website;

pub use delete::DeleteOutcome;
pub use error::SiteError;
pub use ingest::SiteFile;
pub use metadata::{InMemoryMetadataStore, MetadataStore, SeaOrmMetadataStore};
pub use render::{RenderedDocument, extract_title, rewrite_relative_links};
pub use resolve::Resource;

/// Root document used when no other is requested.
pub const DEFAULT_ROOT_DOCUMENT: &str = "index.html";

/// Cache policy attached to every uploaded object and served resource.
pub const CACHE_CONTROL: &str = "public, max-age=3600";

/// Identity of the authenticated user an operation runs on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(String);

impl Owner {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Website operations over an object store and a metadata store.
#[derive(Clone, Copy)]
pub struct SiteService<'a> {
    objects: &'a dyn ObjectStore,
    metadata: &'a dyn MetadataStore,
}

impl<'a> SiteService<'a> {
    pub fn new(objects: &'a dyn ObjectStore, metadata: &'a dyn MetadataStore) -> Self {
        Self { objects, metadata }
    }

    /// All websites owned by `owner`, newest first.
    #[instrument(skip(self, owner), fields(owner = %owner.id()))]
    pub async fn list(&self, owner: &Owner) -> Result<Vec<website::Model>, SiteError> {
        Ok(self.metadata.list_by_owner(owner.id()).await?)
    }

    /// Download one file of a website, resolving its owner through the metadata store.
    async fn fetch(&self, website_id: &str, relative_path: &str) -> Result<Vec<u8>, SiteError> {
        if !naming::is_valid_website_id(website_id) {
            return Err(SiteError::WebsiteNotFound(website_id.to_string()));
        }

        let site = self
            .metadata
            .find(website_id)
            .await?
            .ok_or_else(|| SiteError::WebsiteNotFound(website_id.to_string()))?;

        if validate_key(relative_path).is_err() {
            return Err(SiteError::ResourceNotFound(relative_path.to_string()));
        }

        let key = SitePrefix::new(&site.owner_id, &site.id)?.key(relative_path);
        self.objects.download(&key).await.map_err(|e| {
            if e.is_not_found() {
                SiteError::ResourceNotFound(relative_path.to_string())
            } else {
                SiteError::Storage(e)
            }
        })
    }
}
