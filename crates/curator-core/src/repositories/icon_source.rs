//! Icon source port used by the export renderer

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl IconImage {
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Best-effort icon retrieval. `None` means "use a placeholder".
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IconSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<IconImage>;
}
