//! Object storage for uploaded media.
//!
//! Uploads go to an S3-compatible bucket and are served from a public
//! base URL. The [`ObjectStorage`] trait is the seam the API depends on;
//! tests substitute an in-memory implementation.

pub mod migrate;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

/// Upload size cap, in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted for image uploads.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("file too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("download failed: {0}")]
    Download(String),
}

/// Where uploaded bytes live. Returns the public URL of the stored object.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Base URL under which stored objects are publicly reachable.
    fn public_base_url(&self) -> &str;
}

/// Reject anything that is not a small image of an allowed type.
pub fn validate_image(content_type: &str, size: usize) -> Result<(), StorageError> {
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(StorageError::UnsupportedContentType(
            content_type.to_string(),
        ));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(StorageError::TooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Collision-free object key under `prefix`, with an extension derived
/// from the content type.
pub fn object_key(prefix: &str, content_type: &str) -> String {
    let ext = match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    };
    format!("{prefix}/{}.{ext}", uuid::Uuid::new_v4())
}

/// S3-compatible bucket storage.
#[derive(Clone)]
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3Storage {
    /// Build from the ambient AWS environment plus `STORAGE_BUCKET` and
    /// `STORAGE_PUBLIC_URL`.
    pub async fn from_env() -> Result<Self, StorageError> {
        let bucket = std::env::var("STORAGE_BUCKET")
            .map_err(|_| StorageError::Upload("STORAGE_BUCKET must be set".to_string()))?;
        let public_base_url = std::env::var("STORAGE_PUBLIC_URL")
            .map_err(|_| StorageError::Upload("STORAGE_PUBLIC_URL must be set".to_string()))?;

        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Ok(Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|error| StorageError::Upload(error.to_string()))?;

        tracing::info!(%key, "Uploaded object");
        Ok(format!("{}/{key}", self.public_base_url))
    }

    fn public_base_url(&self) -> &str {
        &self.public_base_url
    }
}
