//! Shareable link generation

use curator_shared::constants::SHARE_PATH_SEGMENT;
use curator_shared::utils::trim_base_url;

use crate::domain::SessionId;
use crate::error::DomainError;

#[derive(Debug, Clone)]
pub struct ShareLinkBuilder {
    base_url: String,
}

impl ShareLinkBuilder {
    pub fn new(frontend_url: &str) -> Result<Self, DomainError> {
        let base_url = trim_base_url(frontend_url);
        if base_url.is_empty() {
            return Err(DomainError::ConfigError("share.frontend_url is not set".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DomainError::ConfigError(format!(
                "share.frontend_url must be an http(s) URL, got {}",
                base_url
            )));
        }
        Ok(Self { base_url: base_url.to_string() })
    }

    pub fn url(&self, session_id: &SessionId) -> String {
        format!("{}/{}/{}", self.base_url, SHARE_PATH_SEGMENT, session_id)
    }
}
