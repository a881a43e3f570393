/// Content type used when an extension is missing or not in the table.
pub const FALLBACK_CONTENT_TYPE: &str = "text/plain";

/// Map a file extension (without the dot, any case) to a MIME type.
pub fn content_type_for_extension(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return FALLBACK_CONTENT_TYPE;
    };

    match ext.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// Resolve the content type of a relative path from the extension of its last segment.
pub fn content_type_for_path(path: &str) -> &'static str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    content_type_for_extension(file_name.rsplit_once('.').map(|(_, ext)| ext))
}
