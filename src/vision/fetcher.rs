//! Photo fetching over HTTP with a bounded timeout
//!
//! Downloads photo bytes from a URL and decodes them into an in-memory
//! image for the detector.

use std::time::Duration;

use async_trait::async_trait;
use image::DynamicImage;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use super::image_utils::{decode_image_bytes, ImageError};

/// Default per-request timeout for photo downloads
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Photo fetch error types
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),

    /// Transport-level request error
    #[error("HTTP error: {0}")]
    Http(String),

    /// HTTP non-success status
    #[error("HTTP {0} for: {1}")]
    HttpStatus(u16, String),

    /// Response body was not a decodable image
    #[error("Invalid image: {0}")]
    Image(#[from] ImageError),
}

/// Capability that retrieves a photo URL as a decoded image
#[async_trait]
pub trait PhotoFetcher: Send + Sync {
    /// Download and decode the photo at `url`
    async fn fetch(&self, url: &str) -> Result<DynamicImage, FetchError>;
}

/// Production fetcher backed by a shared reqwest client
pub struct HttpPhotoFetcher {
    client: Client,
}

impl HttpPhotoFetcher {
    /// Create a fetcher with the given per-request timeout
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpPhotoFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

#[async_trait]
impl PhotoFetcher for HttpPhotoFetcher {
    async fn fetch(&self, url: &str) -> Result<DynamicImage, FetchError> {
        debug!("Fetching photo from: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url.to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let (image, image_info) = decode_image_bytes(&bytes)?;

        info!(
            "Fetched photo {}: {}x{}, {} bytes",
            url, image_info.width, image_info.height, image_info.size_bytes
        );

        Ok(image)
    }
}
