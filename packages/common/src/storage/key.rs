use super::error::StorageError;

/// Top-level namespace for all website objects.
const ROOT: &str = "websites";

/// Storage prefix of a single website: `websites/{owner_id}/{website_id}/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePrefix {
    prefix: String,
}

impl SitePrefix {
    /// Build the prefix for a website. Both ids must be single, non-traversing segments.
    pub fn new(owner_id: &str, website_id: &str) -> Result<Self, StorageError> {
        validate_segment(owner_id)?;
        validate_segment(website_id)?;
        Ok(Self {
            prefix: format!("{ROOT}/{owner_id}/{website_id}/"),
        })
    }

    /// The prefix, always ending in `/`.
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Full key of a file relative to the website root.
    pub fn key(&self, relative_path: &str) -> String {
        format!("{}{}", self.prefix, relative_path)
    }
}

fn validate_segment(segment: &str) -> Result<(), StorageError> {
    if segment.is_empty() || segment == "." || segment == ".." {
        return Err(StorageError::InvalidKey(format!(
            "invalid path segment {segment:?}"
        )));
    }
    if segment.contains(['/', '\\', '\0']) {
        return Err(StorageError::InvalidKey(format!(
            "segment {segment:?} contains a reserved character"
        )));
    }
    Ok(())
}

/// Validate a full object key (`a/b/c`, no empty or dot segments).
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key cannot be empty".into()));
    }
    if key.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "key {key:?} must not start with '/'"
        )));
    }
    key.split('/').try_for_each(validate_segment)
}
