//! Embeddable snippet for third-party pages

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::DomainError;

const EMBED_TEMPLATE: &str = "embed_iframe";

const EMBED_HTML: &str = r#"<iframe src="{{url}}" width="{{width}}" height="{{height}}" style="border:0;" loading="lazy" title="{{title}}"></iframe>"#;

#[derive(Serialize)]
struct EmbedView<'a> {
    url: &'a str,
    width: u32,
    height: u32,
    title: &'a str,
}

pub struct EmbedRenderer {
    registry: Handlebars<'static>,
    width: u32,
    height: u32,
    title: String,
}

impl EmbedRenderer {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Result<Self, DomainError> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(EMBED_TEMPLATE, EMBED_HTML)
            .map_err(|e| DomainError::RenderError(e.to_string()))?;
        Ok(Self {
            registry,
            width,
            height,
            title: title.into(),
        })
    }

    pub fn render(&self, shareable_url: &str) -> Result<String, DomainError> {
        let view = EmbedView {
            url: shareable_url,
            width: self.width,
            height: self.height,
            title: &self.title,
        };
        self.registry
            .render(EMBED_TEMPLATE, &view)
            .map_err(|e| DomainError::RenderError(e.to_string()))
    }
}
