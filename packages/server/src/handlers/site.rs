use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::ContentHash;
use tracing::instrument;

use crate::error::AppError;
use crate::sites::CACHE_CONTROL;
use crate::state::AppState;

/// Header carrying the `<title>` of a rendered root document.
pub const TITLE_HEADER: &str = "x-website-title";

/// Policy applied to hosted content so it runs in an opaque origin.
pub const SANDBOX_POLICY: &str = "sandbox allow-scripts allow-forms allow-popups allow-modals";

/// Serve the root document of a website with its links rewritten.
#[instrument(skip(state))]
pub async fn render_site(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let sites_config = &state.config.sites;
    let document = state
        .sites()
        .render(&id, Some(sites_config.root_document.as_str()))
        .await?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache");

    if let Some(title) = document
        .title
        .as_deref()
        .and_then(|t| HeaderValue::from_str(t).ok())
    {
        builder = builder.header(TITLE_HEADER, title);
    }
    if sites_config.sandbox {
        builder = builder.header(header::CONTENT_SECURITY_POLICY, SANDBOX_POLICY);
    }

    builder
        .body(Body::from(document.html))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Serve any file of a website. Supports ETag-based caching via If-None-Match.
#[instrument(skip(state, headers))]
pub async fn serve_resource(
    State(state): State<AppState>,
    Path((id, path)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let resource = state.sites().resolve(&id, &path).await?;

    let etag_value = ContentHash::compute(&resource.data).etag();
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, resource.content_type)
        .header(header::CONTENT_LENGTH, resource.data.len().to_string())
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, CACHE_CONTROL)
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff");

    // Any uploaded type may be opened as a document (SVG runs scripts too).
    if state.config.sites.sandbox {
        builder = builder.header(header::CONTENT_SECURITY_POLICY, SANDBOX_POLICY);
    }

    builder
        .body(Body::from(resource.data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
