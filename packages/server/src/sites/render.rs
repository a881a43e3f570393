use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::instrument;

use super::{DEFAULT_ROOT_DOCUMENT, SiteError, SiteService, naming};

static LINK_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(src|href)="([^"]+)""#).expect("valid link regex"));

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title>(.*?)</title>").expect("valid title regex"));

/// A website document prepared for serving.
///
/// The markup is the uploader's own and is returned unsanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub html: String,
    pub title: Option<String>,
}

fn is_absolute(value: &str) -> bool {
    value.starts_with("http") || value.starts_with("//") || value.starts_with("data:")
}

/// Point every relative `src`/`href` value at `/sites/{website_id}/`.
pub fn rewrite_relative_links(html: &str, website_id: &str) -> String {
    let base = naming::website_url(website_id);
    LINK_ATTR
        .replace_all(html, |caps: &Captures| {
            let (attr, value) = (&caps[1], &caps[2]);
            if is_absolute(value) {
                caps[0].to_string()
            } else {
                format!("{attr}=\"{base}/{}\"", value.trim_start_matches('/'))
            }
        })
        .into_owned()
}

/// Text of the first `<title>` element, if any.
pub fn extract_title(html: &str) -> Option<String> {
    TITLE
        .captures(html)
        .map(|caps| caps[1].trim().to_string())
        .filter(|title| !title.is_empty())
}

impl SiteService<'_> {
    /// Fetch an HTML document of a website (the root document by default) with
    /// its relative links rewritten to resolve through `/sites/{id}/`.
    #[instrument(skip(self))]
    pub async fn render(
        &self,
        website_id: &str,
        path: Option<&str>,
    ) -> Result<RenderedDocument, SiteError> {
        let path = path.unwrap_or(DEFAULT_ROOT_DOCUMENT);
        let data = self.fetch(website_id, path).await?;

        let html = rewrite_relative_links(&String::from_utf8_lossy(&data), website_id);
        let title = extract_title(&html);

        Ok(RenderedDocument { html, title })
    }
}
