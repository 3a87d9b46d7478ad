use thiserror::Error;

/// Largest accepted recipe image, in bytes (5 MiB).
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

/// Rejections raised before an image reaches the blob store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("expected an image, got '{0}'")]
    UnsupportedType(String),
    #[error("image is {actual} bytes, limit is {limit} bytes")]
    TooLarge { actual: u64, limit: u64 },
}

/// Resolve the content type of an upload.
///
/// A declared type wins unless it is the generic `application/octet-stream`,
/// in which case the type is guessed from the file extension.
pub fn resolve_content_type(declared: Option<&str>, filename: Option<&str>) -> Option<String> {
    match declared.map(str::trim) {
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => Some(ct.to_string()),
        _ => filename
            .and_then(|name| mime_guess::from_path(name).first())
            .map(|m| m.to_string()),
    }
}

/// Check that the content type names an image.
pub fn ensure_image_type(content_type: Option<&str>) -> Result<(), AssetError> {
    match content_type {
        Some(ct) if ct.to_ascii_lowercase().starts_with("image/") => Ok(()),
        Some(ct) => Err(AssetError::UnsupportedType(ct.to_string())),
        None => Err(AssetError::UnsupportedType("unknown".into())),
    }
}

/// Check a running byte count against [`MAX_IMAGE_SIZE`].
pub fn ensure_image_size(size: u64) -> Result<(), AssetError> {
    if size > MAX_IMAGE_SIZE {
        return Err(AssetError::TooLarge {
            actual: size,
            limit: MAX_IMAGE_SIZE,
        });
    }
    Ok(())
}

/// Flat name recorded for an upload that arrived without a file name.
///
/// The extension follows the content type, e.g. `0193…c1.png`.
pub fn fallback_image_name(content_type: &str) -> String {
    let id = uuid::Uuid::now_v7().simple();
    let ext = mime_guess::get_mime_extensions_str(content_type)
        .and_then(|exts| exts.first());
    match ext {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}
