/// Maximum length of a website-relative file path.
pub const MAX_PATH_LEN: usize = 512;

/// Checks if a path string contains path traversal patterns.
pub fn contains_path_traversal(path: &str) -> bool {
    path == ".."
        || path.starts_with("../")
        || path.contains("/../")
        || path.ends_with("/..")
        || path.starts_with("..\\")
        || path.contains("\\..\\")
        || path.ends_with("\\..")
}

fn is_allowed_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '/' | '-' | '_' | '.' | '~' | '+' | '@' | '(' | ')' | ' ')
}

/// Validates the path of an uploaded website file, relative to the website root.
///
/// Returns the trimmed path on success.
pub fn validate_site_path(path: &str) -> Result<String, &'static str> {
    let trimmed = path.trim();

    if trimmed.is_empty() {
        return Err("Path cannot be empty");
    }

    if trimmed.len() > MAX_PATH_LEN {
        return Err("Path exceeds maximum length of 512 characters");
    }

    if trimmed.contains('\0') {
        return Err("Path must not contain null bytes");
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err("Path must not contain control characters");
    }

    if trimmed.contains('\\') {
        return Err("Path must not contain backslashes");
    }

    if trimmed.starts_with('/') {
        return Err("Path must not start with '/'");
    }

    if trimmed.ends_with('/') {
        return Err("Path must not end with '/'");
    }

    if trimmed.contains("//") {
        return Err("Path must not contain consecutive slashes");
    }

    if contains_path_traversal(trimmed) {
        return Err("Path must not contain '..' traversal");
    }

    for segment in trimmed.split('/') {
        if segment.is_empty() {
            return Err("Path must not contain empty segments");
        }
        if segment.starts_with('.') {
            return Err("Path segments must not start with '.'");
        }
    }

    if !trimmed.chars().all(is_allowed_char) {
        return Err("Path contains invalid characters");
    }

    Ok(trimmed.to_string())
}
