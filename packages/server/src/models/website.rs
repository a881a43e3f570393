use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::website;
use crate::error::AppError;
use crate::sites::SiteFile;

/// Response DTO for a single hosted website.
#[derive(Serialize, utoipa::ToSchema)]
pub struct WebsiteResponse {
    /// Website ID, 10 characters from `A-Za-z0-9_-`.
    #[schema(example = "V1StGXR8_Z")]
    pub id: String,
    /// Opaque identity of the uploader.
    #[schema(example = "user-42")]
    pub owner_id: String,
    /// Name derived from the first uploaded file.
    #[schema(example = "index")]
    pub name: String,
    /// Public path the website is served under.
    #[schema(example = "/sites/V1StGXR8_Z")]
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Response DTO for listing websites.
#[derive(Serialize, utoipa::ToSchema)]
pub struct WebsiteListResponse {
    pub websites: Vec<WebsiteResponse>,
    pub total: u64,
}

impl From<website::Model> for WebsiteResponse {
    fn from(model: website::Model) -> Self {
        Self {
            id: model.id,
            owner_id: model.owner_id,
            name: model.name,
            url: model.url,
            created_at: model.created_at,
        }
    }
}

/// Check an uploaded file set before anything is stored.
///
/// Paths must be unique, the count within `max_files`, and the root document
/// must be present at the top level. No path may also be a directory of
/// another one, since a key cannot be both a file and a folder.
pub fn validate_site_files(
    files: &[SiteFile],
    root_document: &str,
    max_files: usize,
) -> Result<(), AppError> {
    if files.is_empty() {
        return Err(AppError::Validation("At least one file is required".into()));
    }

    if files.len() > max_files {
        return Err(AppError::Validation(format!(
            "Too many files: {} (maximum {max_files})",
            files.len()
        )));
    }

    let mut seen = HashSet::with_capacity(files.len());
    for file in files {
        if !seen.insert(file.path.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate file path '{}'",
                file.path
            )));
        }
    }

    for file in files {
        let parents = file.path.match_indices('/').map(|(i, _)| &file.path[..i]);
        for parent in parents {
            if seen.contains(parent) {
                return Err(AppError::Validation(format!(
                    "'{parent}' is both a file and the directory of '{}'",
                    file.path
                )));
            }
        }
    }

    if !seen.contains(root_document) {
        return Err(AppError::Validation(format!(
            "Upload must include {root_document}"
        )));
    }

    Ok(())
}
