//! Derived, non-persisted representations of a personalized list.

pub mod share_link;
pub mod qr;
pub mod export;
pub mod embed;

pub use share_link::ShareLinkBuilder;
pub use qr::QrEncoder;
pub use export::{collect_icons, ExportDocument, ExportFormat, ExportRenderer};
pub use embed::EmbedRenderer;
