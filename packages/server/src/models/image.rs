use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::image;

/// Response DTO for an uploaded image.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ImageResponse {
    /// Public URL to store in a recipe's `image_url`.
    #[schema(example = "http://127.0.0.1:3000/api/v1/images/a1b2c3d4e5f6...")]
    pub url: String,
    /// SHA-256 content hash.
    #[schema(example = "a1b2c3d4e5f6...")]
    pub content_hash: String,
    #[schema(example = "image/jpeg")]
    pub content_type: String,
    /// Image size in bytes.
    #[schema(example = 142857)]
    pub size: i64,
    #[schema(example = "cookies.jpg")]
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

impl ImageResponse {
    pub fn from_model(model: image::Model, url: String) -> Self {
        Self {
            url,
            content_hash: model.content_hash,
            content_type: model.content_type,
            size: model.size,
            filename: model.filename,
            created_at: model.created_at,
        }
    }
}
