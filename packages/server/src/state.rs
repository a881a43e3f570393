use std::sync::Arc;

use common::storage::ObjectStore;

use crate::config::AppConfig;
use crate::sites::{MetadataStore, SiteService};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub objects: Arc<dyn ObjectStore>,
    pub metadata: Arc<dyn MetadataStore>,
}

impl AppState {
    /// Site operations bound to this state's store handles.
    pub fn sites(&self) -> SiteService<'_> {
        SiteService::new(&*self.objects, &*self.metadata)
    }
}
