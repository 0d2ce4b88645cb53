// ============================================================================
// Curator Core - Export Renderer
// File: crates/curator-core/src/artifacts/export.rs
// Description: Static HTML / plain-text documents for a personalized list
// ============================================================================

use std::collections::HashMap;
use std::fmt::Write as _;
use std::str::FromStr;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use curator_shared::ItemId;
use futures::future::join_all;
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{ItemRef, SessionId};
use crate::error::DomainError;
use crate::repositories::{IconImage, IconSource};

const EXPORT_TEMPLATE: &str = "export_html";

const EXPORT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{title}}</title>
<style>
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 720px; color: #1f2933; }
ul.apps { list-style: none; padding: 0; }
li.app { display: flex; gap: 1rem; padding: 1rem 0; border-bottom: 1px solid #e4e7eb; }
li.app img { border-radius: 12px; flex-shrink: 0; }
.links a { display: inline-block; margin: 0.25rem 0.5rem 0 0; padding: 0.4rem 0.8rem; border-radius: 6px; text-decoration: none; }
.store-button--ios { background: #111; color: #fff; }
.store-button--android { background: #01875f; color: #fff; }
.web-link { border: 1px solid #cbd2d9; color: #1f2933; }
</style>
</head>
<body>
<h1>{{title}}</h1>
<p class="meta">{{count}} apps, exported {{generated_at}}</p>
<ul class="apps">
{{#each items}}
<li class="app" data-app-id="{{id}}">
{{#if icon_data}}<img src="{{{icon_data}}}" alt="{{name}} icon" width="64" height="64">{{else}}<img src="{{icon_url}}" alt="{{name}} icon" width="64" height="64">{{/if}}
<div class="details">
<h2>{{name}}</h2>
{{#if category}}<p class="category">{{category}}</p>{{/if}}
{{#if description}}<p>{{description}}</p>{{/if}}
<div class="links">
{{#if ios_link}}<a class="store-button store-button--ios" href="{{ios_link}}">App Store</a>{{/if}}
{{#if android_link}}<a class="store-button store-button--android" href="{{android_link}}">Google Play</a>{{/if}}
{{#if website_link}}<a class="web-link" href="{{website_link}}">Website</a>{{/if}}
</div>
</div>
</li>
{{/each}}
</ul>
</body>
</html>
"#;

const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64"><rect width="64" height="64" rx="12" fill="#cbd2d9"/><path d="M20 44l8-10 6 7 4-5 6 8z" fill="#9aa5b1"/></svg>"##;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Html,
    Text,
}

impl FromStr for ExportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(DomainError::ValidationError(format!(
                "Unsupported export format: {}",
                other
            ))),
        }
    }
}

/// A rendered document ready to be served as a download.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub content_type: &'static str,
    pub file_name: String,
    pub body: String,
}

#[derive(Serialize)]
struct ExportView<'a> {
    title: &'a str,
    count: usize,
    generated_at: String,
    items: Vec<ExportItemView<'a>>,
}

#[derive(Serialize)]
struct ExportItemView<'a> {
    id: ItemId,
    name: &'a str,
    description: Option<&'a str>,
    category: Option<&'a str>,
    /// Trusted `data:` URI built here; rendered unescaped.
    icon_data: Option<String>,
    icon_url: Option<&'a str>,
    ios_link: Option<&'a str>,
    android_link: Option<&'a str>,
    website_link: Option<&'a str>,
}

pub struct ExportRenderer {
    registry: Handlebars<'static>,
    title: String,
    placeholder_icon: String,
}

impl ExportRenderer {
    pub fn new(title: impl Into<String>) -> Result<Self, DomainError> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(EXPORT_TEMPLATE, EXPORT_HTML)
            .map_err(|e| DomainError::RenderError(e.to_string()))?;

        Ok(Self {
            registry,
            title: title.into(),
            placeholder_icon: format!(
                "data:image/svg+xml;base64,{}",
                STANDARD.encode(PLACEHOLDER_SVG)
            ),
        })
    }

    pub fn placeholder_icon(&self) -> &str {
        &self.placeholder_icon
    }

    /// Render the HTML document.
    ///
    /// With `inline_icons`, every item gets a `data:` icon: the fetched one
    /// when present in `icons`, the placeholder otherwise. Without it, the
    /// catalog icon URL is referenced directly.
    pub fn render_html(
        &self,
        items: &[ItemRef],
        icons: &HashMap<ItemId, IconImage>,
        inline_icons: bool,
    ) -> Result<String, DomainError> {
        let view = ExportView {
            title: &self.title,
            count: items.len(),
            generated_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
            items: items
                .iter()
                .map(|item| {
                    let icon_data = if inline_icons {
                        Some(
                            icons
                                .get(&item.id)
                                .filter(|icon| is_safe_image_mime(&icon.mime))
                                .map(IconImage::to_data_uri)
                                .unwrap_or_else(|| self.placeholder_icon.clone()),
                        )
                    } else if item.icon_url.is_none() {
                        Some(self.placeholder_icon.clone())
                    } else {
                        None
                    };

                    ExportItemView {
                        id: item.id,
                        name: &item.name,
                        description: item.description.as_deref(),
                        category: item.category.as_deref(),
                        icon_data,
                        icon_url: item.icon_url.as_deref(),
                        ios_link: item.links.ios.as_deref(),
                        android_link: item.links.android.as_deref(),
                        website_link: item.links.website.as_deref(),
                    }
                })
                .collect(),
        };

        self.registry
            .render(EXPORT_TEMPLATE, &view)
            .map_err(|e| DomainError::RenderError(e.to_string()))
    }

    pub fn render_text(&self, items: &[ItemRef]) -> String {
        let mut out = String::new();
        let heading = format!("{} ({} apps)", self.title, items.len());
        let _ = writeln!(out, "{}", heading);
        let _ = writeln!(out, "{}", "=".repeat(heading.chars().count()));

        for (idx, item) in items.iter().enumerate() {
            let _ = writeln!(out);
            match item.description.as_deref() {
                Some(desc) => {
                    let _ = writeln!(out, "{}. {} - {}", idx + 1, item.name, desc);
                }
                None => {
                    let _ = writeln!(out, "{}. {}", idx + 1, item.name);
                }
            }
            if let Some(link) = item.links.ios.as_deref() {
                let _ = writeln!(out, "   App Store: {}", link);
            }
            if let Some(link) = item.links.android.as_deref() {
                let _ = writeln!(out, "   Google Play: {}", link);
            }
            if let Some(link) = item.links.website.as_deref() {
                let _ = writeln!(out, "   Website: {}", link);
            }
        }
        out
    }

    pub fn document(&self, session_id: &SessionId, format: ExportFormat, body: String) -> ExportDocument {
        match format {
            ExportFormat::Html => ExportDocument {
                content_type: "text/html; charset=utf-8",
                file_name: format!("app_list_{}.html", session_id),
                body,
            },
            ExportFormat::Text => ExportDocument {
                content_type: "text/plain; charset=utf-8",
                file_name: format!("app_list_{}.txt", session_id),
                body,
            },
        }
    }
}

fn is_safe_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
        && mime
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '+' | '-' | '.'))
}

/// Fetch icons concurrently, each bounded by `per_icon_timeout`.
///
/// Items without an icon URL, failed fetches, and timeouts are simply
/// missing from the result.
pub async fn collect_icons(
    source: &dyn IconSource,
    items: &[ItemRef],
    per_icon_timeout: Duration,
) -> HashMap<ItemId, IconImage> {
    let fetches = items
        .iter()
        .filter_map(|item| item.icon_url.as_deref().map(|url| (item.id, url)))
        .map(|(id, url)| async move {
            match tokio::time::timeout(per_icon_timeout, source.fetch(url)).await {
                Ok(Some(icon)) => Some((id, icon)),
                Ok(None) => {
                    debug!("Icon unavailable for app {}, using placeholder", id);
                    None
                }
                Err(_) => {
                    warn!("Icon fetch for app {} timed out after {:?}", id, per_icon_timeout);
                    None
                }
            }
        });

    join_all(fetches).await.into_iter().flatten().collect()
}
