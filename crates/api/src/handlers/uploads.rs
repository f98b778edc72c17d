//! Handlers for media uploads.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use vitrine_storage::{object_key, validate_image};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Typed response for the image upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    /// Public URL of the stored image, ready to be written into a
    /// settings leaf.
    pub url: String,
}

/// POST /api/v1/uploads/images
///
/// Accept a single-file multipart upload, validate it is a small image
/// of an allowed type, and store it. Returns the public URL.
pub async fn upload_image(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadResult>>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        // Only file fields are of interest; metadata fields are skipped.
        if field.file_name().is_none() {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::BadRequest("File field is missing a content type".into()))?
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Could not read upload: {e}")))?
            .to_vec();

        validate_image(&content_type, bytes.len())?;

        let key = object_key("uploads", &content_type);
        let url = state.storage.upload(&key, bytes, &content_type).await?;

        tracing::info!(%key, "Image uploaded");
        return Ok((
            StatusCode::CREATED,
            Json(DataResponse {
                data: UploadResult { url },
            }),
        ));
    }

    Err(AppError::BadRequest(
        "No file received in multipart upload".to_string(),
    ))
}
