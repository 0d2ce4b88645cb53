// ============================================================================
// Curator Core - Share Service
// File: crates/curator-core/src/services/share_service.rs
// ============================================================================
//! Derives shareable artifacts (link, QR, export, embed) from a session.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::artifacts::{
    collect_icons, EmbedRenderer, ExportDocument, ExportFormat, ExportRenderer, QrEncoder,
    ShareLinkBuilder,
};
use crate::domain::{ItemRef, SessionId};
use crate::error::DomainError;
use crate::repositories::IconSource;
use crate::services::SessionListService;

const DOCUMENT_TITLE: &str = "My travel apps";

#[derive(Debug, Clone)]
pub struct ShareOptions {
    pub frontend_url: String,
    pub embed_width: u32,
    pub embed_height: u32,
    pub icon_timeout: Duration,
    pub qr_min_size: u32,
}

/// QR payload returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct QrArtifact {
    pub qr_code: String,
    pub shareable_url: String,
    pub selected_apps: Vec<ItemRef>,
}

pub struct ShareService {
    sessions: Arc<SessionListService>,
    icons: Arc<dyn IconSource>,
    links: ShareLinkBuilder,
    qr: QrEncoder,
    exporter: ExportRenderer,
    embed: EmbedRenderer,
    icon_timeout: Duration,
}

impl ShareService {
    pub fn new(
        sessions: Arc<SessionListService>,
        icons: Arc<dyn IconSource>,
        options: ShareOptions,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            sessions,
            icons,
            links: ShareLinkBuilder::new(&options.frontend_url)?,
            qr: QrEncoder::new(options.qr_min_size),
            exporter: ExportRenderer::new(DOCUMENT_TITLE)?,
            embed: EmbedRenderer::new(options.embed_width, options.embed_height, DOCUMENT_TITLE)?,
            icon_timeout: options.icon_timeout,
        })
    }

    pub async fn shareable_url(&self, session_id: &SessionId) -> Result<String, DomainError> {
        self.require_session(session_id).await?;
        Ok(self.links.url(session_id))
    }

    /// QR code for the shareable URL, plus the current selection.
    pub async fn qr_code(&self, session_id: &SessionId) -> Result<QrArtifact, DomainError> {
        let selected_apps = self.sessions.get_items(session_id).await?;
        let shareable_url = self.links.url(session_id);
        let qr_code = self.qr.encode_base64(&[shareable_url.as_str()])?;

        debug!("Generated QR code for {} apps", selected_apps.len());
        Ok(QrArtifact {
            qr_code,
            shareable_url,
            selected_apps,
        })
    }

    /// Raw PNG bytes of the same QR code, for downloads.
    pub async fn qr_png(&self, session_id: &SessionId) -> Result<Vec<u8>, DomainError> {
        self.require_session(session_id).await?;
        self.qr.encode_png(&[self.links.url(session_id).as_str()])
    }

    pub async fn export(
        &self,
        session_id: &SessionId,
        format: ExportFormat,
        inline_icons: bool,
    ) -> Result<ExportDocument, DomainError> {
        let items = self.sessions.get_items(session_id).await?;

        let body = match format {
            ExportFormat::Text => self.exporter.render_text(&items),
            ExportFormat::Html => {
                let icons = if inline_icons {
                    collect_icons(self.icons.as_ref(), &items, self.icon_timeout).await
                } else {
                    HashMap::new()
                };
                info!(
                    "Exporting {} apps as HTML ({} icons inlined)",
                    items.len(),
                    icons.len()
                );
                self.exporter.render_html(&items, &icons, inline_icons)?
            }
        };

        Ok(self.exporter.document(session_id, format, body))
    }

    pub async fn embed_snippet(&self, session_id: &SessionId) -> Result<String, DomainError> {
        self.require_session(session_id).await?;
        self.embed.render(&self.links.url(session_id))
    }

    async fn require_session(&self, session_id: &SessionId) -> Result<(), DomainError> {
        self.sessions.ensure_live(session_id).await
    }
}
