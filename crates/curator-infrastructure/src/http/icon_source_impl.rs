// ============================================================================
// Curator Infrastructure - HTTP Icon Source
// File: crates/curator-infrastructure/src/http/icon_source_impl.rs
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, warn};

use curator_core::error::DomainError;
use curator_core::repositories::{IconImage, IconSource};

/// Fetches app icons over HTTP for inlining into exports.
///
/// Every failure mode (timeout, non-2xx, non-image, oversize) yields `None`.
pub struct HttpIconSource {
    client: Client,
    max_bytes: usize,
}

impl HttpIconSource {
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("travel-app-curator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::ConfigError(format!("cannot build icon http client: {}", e)))?;

        Ok(Self { client, max_bytes })
    }

    async fn try_fetch(&self, url: &str) -> Result<IconImage, String> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("status {}", response.status()));
        }

        let mime = resolve_mime(
            url,
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        )?;

        if let Some(len) = response.content_length() {
            if len > self.max_bytes as u64 {
                return Err(format!("declared size {} exceeds limit", len));
            }
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| format!("body read failed: {}", e))?
        {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err("body exceeds size limit".to_string());
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err("empty body".to_string());
        }

        Ok(IconImage { mime, bytes })
    }
}

/// Content type from the header, falling back to the URL extension when the
/// server sends nothing useful.
fn resolve_mime(url: &str, header: Option<&str>) -> Result<String, String> {
    let declared = header
        .and_then(|h| h.split(';').next())
        .map(|h| h.trim().to_ascii_lowercase())
        .filter(|h| !h.is_empty() && h != "application/octet-stream");

    let mime = match declared {
        Some(mime) => mime,
        None => {
            let path = url.split(['?', '#']).next().unwrap_or(url);
            mime_guess::from_path(path)
                .first()
                .map(|m| m.essence_str().to_string())
                .ok_or_else(|| "unknown content type".to_string())?
        }
    };

    if mime.starts_with("image/") {
        Ok(mime)
    } else {
        Err(format!("not an image: {}", mime))
    }
}

#[async_trait]
impl IconSource for HttpIconSource {
    async fn fetch(&self, url: &str) -> Option<IconImage> {
        match self.try_fetch(url).await {
            Ok(icon) => {
                debug!("Fetched icon {} ({} bytes)", url, icon.bytes.len());
                Some(icon)
            }
            Err(reason) => {
                warn!("Icon {} unavailable: {}", url, reason);
                None
            }
        }
    }
}
