//! Object storage for event images
//!
//! The hosted storage service is treated as an opaque collaborator: a
//! single upload call that either yields a public URL or fails with an
//! [`UploadError`]. Failures are surfaced to the caller without retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};
use url::Url;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::utils::errors::{Result, UploadError};

/// External object store interface
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a blob and return its public URL
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}

/// Object store client for a hosted storage service
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: Client,
    base_url: Url,
    bucket: String,
    service_key: String,
}

impl HttpObjectStore {
    /// Create a new HttpObjectStore instance
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("FestHub/1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            bucket: config.bucket.clone(),
            service_key: config.service_key.clone(),
        })
    }

    /// Public URL for an object path in the configured bucket
    pub fn public_url(&self, path: &str) -> String {
        let encoded: Vec<_> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "{}storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            encoded.join("/")
        )
    }

    fn upload_url(&self, path: &str) -> String {
        format!("{}storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        debug!(path = %path, size = bytes.len(), "Uploading object");

        let response = self
            .client
            .post(self.upload_url(path))
            .bearer_auth(&self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UploadError::Timeout
                } else {
                    UploadError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            error!(path = %path, status = %response.status(), "Object upload failed");
            return Err(UploadError::RequestFailed(format!(
                "storage service returned {}",
                response.status()
            ))
            .into());
        }

        let url = self.public_url(path);
        info!(path = %path, url = %url, "Object uploaded");
        Ok(url)
    }
}

/// Build a collision-free object name preserving the original extension
pub fn unique_object_name(original: &str) -> String {
    match original.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{}.{}", Uuid::new_v4(), ext),
        _ => Uuid::new_v4().to_string(),
    }
}
