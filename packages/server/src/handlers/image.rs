use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, body::Body};
use chrono::Utc;
use common::image::{
    MAX_IMAGE_SIZE, ensure_image_size, ensure_image_type, fallback_image_name, resolve_content_type,
};
use common::storage::ContentHash;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};
use tokio_util::io::ReaderStream;
use tracing::{info, instrument};

use crate::entity::image;
use crate::error::{AppError, ErrorBody};
use crate::models::image::ImageResponse;
use crate::state::AppState;
use crate::utils::filename::validate_flat_filename;

/// Room for the image plus multipart framing; the image itself is capped
/// separately at [`MAX_IMAGE_SIZE`].
pub fn image_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_IMAGE_SIZE as usize + 64 * 1024)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Images",
    operation_id = "uploadImage",
    summary = "Upload a recipe image",
    description = "Stores an image and returns the public URL to put in a recipe's `image_url`. \
        The `file` multipart field is required, must be an `image/*` type and at most 5 MiB. \
        Uploading identical bytes twice returns the same URL.",
    request_body(content_type = "multipart/form-data", description = "Image file"),
    responses(
        (status = 201, description = "Image stored", body = ImageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 413, description = "Image larger than 5 MiB (PAYLOAD_TOO_LARGE)", body = ErrorBody),
        (status = 415, description = "Not an image (UNSUPPORTED_MEDIA_TYPE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut upload: Option<(Vec<u8>, String, String)> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue; // Ignore unknown fields.
        }

        let original_name = field
            .file_name()
            .map(|name| {
                validate_flat_filename(name)
                    .map(str::to_string)
                    .map_err(|e| AppError::Validation(e.message().into()))
            })
            .transpose()?;
        let content_type = resolve_content_type(field.content_type(), original_name.as_deref());

        // Reject before any bytes are buffered or stored.
        ensure_image_type(content_type.as_deref())?;
        let content_type = content_type.unwrap_or_default();

        let mut data = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
        {
            ensure_image_size((data.len() + chunk.len()) as u64)?;
            data.extend_from_slice(&chunk);
        }

        let filename = original_name.unwrap_or_else(|| fallback_image_name(&content_type));
        upload = Some((data, content_type, filename));
    }

    let (data, content_type, filename) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::Validation("Image file is empty".into()));
    }

    let hash = state.blob_store.put(&data).await?;
    let size = i64::try_from(data.len()).unwrap_or(i64::MAX);

    let row = image::ActiveModel {
        content_hash: Set(hash.to_hex()),
        content_type: Set(content_type),
        size: Set(size),
        filename: Set(filename),
        created_at: Set(Utc::now()),
    };
    image::Entity::insert(row)
        .on_conflict(
            OnConflict::column(image::Column::ContentHash)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&state.db)
        .await?;

    let saved = find_image(&state, &hash).await?;
    info!(%hash, size, "Stored image");

    let url = state.config.image_url(&saved.content_hash);
    Ok((
        StatusCode::CREATED,
        Json(ImageResponse::from_model(saved, url)),
    ))
}

#[utoipa::path(
    get,
    path = "/{hash}",
    tag = "Images",
    operation_id = "getImage",
    summary = "Download an image",
    description = "Streams the image. Supports ETag-based caching via If-None-Match.",
    params(("hash" = String, Path, description = "SHA-256 content hash")),
    responses(
        (status = 200, description = "Image content"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 400, description = "Malformed hash (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Image not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn get_image(
    State(state): State<AppState>,
    Path(hash): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let hash = ContentHash::from_hex(&hash.to_ascii_lowercase())?;
    let model = find_image(&state, &hash).await?;

    let etag = hash.etag();
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let reader = state.blob_store.get_stream(&hash).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &model.content_type)
        .header(header::CONTENT_LENGTH, model.size.to_string())
        .header(header::ETAG, &etag)
        // Content-addressed, so the bytes behind a URL never change.
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

async fn find_image(state: &AppState, hash: &ContentHash) -> Result<image::Model, AppError> {
    image::Entity::find_by_id(hash.to_hex())
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))
}
