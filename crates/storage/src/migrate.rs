//! Re-hosting of externally-hosted images.
//!
//! Settings trees accumulated image URLs pointing at third-party hosts
//! over time. This walks a tree, downloads every external image, uploads
//! it to our own bucket, and rewrites the leaf to the new URL. Leaves
//! already under our public base URL are left alone.

use serde_json::Value;
use vitrine_core::settings::{write_at_path, PathSeg};

use crate::{object_key, validate_image, ObjectStorage, StorageError};

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// One external image found in a settings tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalImage {
    pub path: Vec<PathSeg>,
    pub url: String,
}

/// Outcome of one re-hosting pass.
#[derive(Debug)]
pub struct MigrationReport {
    pub settings: Value,
    pub migrated: usize,
    /// URLs that could not be fetched or stored; the leaf keeps its old
    /// value so a later pass can retry.
    pub failed: Vec<String>,
}

fn looks_like_image_url(value: &str) -> bool {
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return false;
    }
    let without_query = value.split('?').next().unwrap_or(value).to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| without_query.ends_with(ext))
}

/// Collect every image URL in the tree that is not already hosted under
/// `own_base_url`.
pub fn collect_external_images(settings: &Value, own_base_url: &str) -> Vec<ExternalImage> {
    let mut found = Vec::new();
    walk(settings, &mut Vec::new(), own_base_url, &mut found);
    found
}

fn walk(value: &Value, path: &mut Vec<PathSeg>, own_base_url: &str, found: &mut Vec<ExternalImage>) {
    match value {
        Value::String(s) => {
            if looks_like_image_url(s) && !s.starts_with(own_base_url) {
                found.push(ExternalImage {
                    path: path.clone(),
                    url: s.clone(),
                });
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                path.push(PathSeg::key(key.clone()));
                walk(child, path, own_base_url, found);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(PathSeg::index(index));
                walk(child, path, own_base_url, found);
                path.pop();
            }
        }
        _ => {}
    }
}

/// Download and re-host every external image in `settings`.
///
/// Failures are per-image: one unreachable URL does not abort the pass.
pub async fn rehost_images(
    storage: &dyn ObjectStorage,
    client: &reqwest::Client,
    settings: &Value,
) -> MigrationReport {
    let targets = collect_external_images(settings, storage.public_base_url());
    let mut current = settings.clone();
    let mut migrated = 0;
    let mut failed = Vec::new();

    for target in targets {
        match rehost_one(storage, client, &target.url).await {
            Ok(new_url) => match write_at_path(&current, &target.path, Value::String(new_url)) {
                Ok(updated) => {
                    current = updated;
                    migrated += 1;
                }
                Err(error) => {
                    tracing::warn!(url = %target.url, %error, "Could not rewrite migrated leaf");
                    failed.push(target.url);
                }
            },
            Err(error) => {
                tracing::warn!(url = %target.url, %error, "Image migration failed");
                failed.push(target.url);
            }
        }
    }

    MigrationReport {
        settings: current,
        migrated,
        failed,
    }
}

async fn rehost_one(
    storage: &dyn ObjectStorage,
    client: &reqwest::Client,
    url: &str,
) -> Result<String, StorageError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|error| StorageError::Download(error.to_string()))?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let bytes = response
        .bytes()
        .await
        .map_err(|error| StorageError::Download(error.to_string()))?
        .to_vec();

    validate_image(&content_type, bytes.len())?;

    let key = object_key("migrated", &content_type);
    storage.upload(&key, bytes, &content_type).await
}
