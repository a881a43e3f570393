use rand::Rng;

/// Length of a generated website id.
pub const WEBSITE_ID_LEN: usize = 10;

/// URL-safe id alphabet (64 symbols, 6 bits per character).
const ID_ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Name used when the first file's base name yields nothing usable.
const FALLBACK_NAME: &str = "website";

/// Generate a random website id.
pub fn generate_website_id() -> String {
    let mut rng = rand::rng();
    (0..WEBSITE_ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Whether `id` could have been produced by [`generate_website_id`].
pub fn is_valid_website_id(id: &str) -> bool {
    id.len() == WEBSITE_ID_LEN && id.bytes().all(|b| ID_ALPHABET.contains(&b))
}

/// Public path of a website.
pub fn website_url(website_id: &str) -> String {
    format!("/sites/{website_id}")
}

/// Derive a display name from a file path: the base name up to its first `.`,
/// lower-cased, with everything outside `[a-z0-9]` replaced by `-`.
pub fn derive_name(path: &str) -> String {
    let base = path.rsplit('/').next().unwrap_or(path);
    let stem = base.split('.').next().unwrap_or_default();
    let name: String = stem
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect();

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}
