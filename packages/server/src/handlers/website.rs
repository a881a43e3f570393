use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::website::{WebsiteListResponse, WebsiteResponse, validate_site_files};
use crate::sites::SiteFile;
use crate::state::AppState;
use crate::utils::filename::validate_site_path;

/// Multipart field that carries website files.
const FILES_FIELD: &str = "files";

fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the limit of {limit} bytes"))
    } else {
        AppError::Validation(format!("Multipart error: {}", err.body_text()))
    }
}

/// Body limit layer for website uploads.
pub fn upload_body_limit(max_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_bytes)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Websites",
    operation_id = "uploadWebsite",
    summary = "Upload a static website",
    description = "Uploads a set of files as a new website. Each file is a `files` multipart \
        field whose filename is its path relative to the website root. The set must contain \
        the root document (`index.html` by default) at the top level. Either every file is \
        stored and the website is created, or nothing is.",
    request_body(content_type = "multipart/form-data", description = "Website files"),
    responses(
        (status = 201, description = "Website created", body = WebsiteResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 413, description = "Upload exceeds the body limit (PAYLOAD_TOO_LARGE)", body = ErrorBody),
        (status = 502, description = "Object storage rejected a file (UPLOAD_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(owner = %auth_user.owner().id()))]
pub async fn upload_website(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let sites_config = &state.config.sites;
    let limit = sites_config.max_upload_size;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue; // Ignore unknown fields.
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
        let path = validate_site_path(&file_name)
            .map_err(|e| AppError::Validation(format!("{e}: '{file_name}'")))?;

        let data = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        files.push(SiteFile {
            path,
            data: data.to_vec(),
        });
    }

    validate_site_files(&files, &sites_config.root_document, sites_config.max_files)?;

    let website = state.sites().ingest(auth_user.owner(), &files).await?;

    Ok((StatusCode::CREATED, Json(WebsiteResponse::from(website))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Websites",
    operation_id = "listWebsites",
    summary = "List your websites",
    description = "Returns every website owned by the caller, newest first.",
    responses(
        (status = 200, description = "Website list", body = WebsiteListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(owner = %auth_user.owner().id()))]
pub async fn list_websites(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<WebsiteListResponse>, AppError> {
    let records = state.sites().list(auth_user.owner()).await?;

    let total = records.len() as u64;
    let websites = records.into_iter().map(WebsiteResponse::from).collect();

    Ok(Json(WebsiteListResponse { websites, total }))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Websites",
    operation_id = "deleteWebsite",
    summary = "Delete a website",
    description = "Removes every stored file and the record of a website owned by the caller. \
        Websites owned by someone else, or already deleted, are left untouched and the \
        request still succeeds.",
    params(("id" = String, Path, description = "Website ID")),
    responses(
        (status = 204, description = "Website deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(owner = %auth_user.owner().id()))]
pub async fn delete_website(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.sites().delete(auth_user.owner(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
