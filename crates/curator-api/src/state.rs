use std::sync::Arc;

use curator_core::repositories::{CatalogBrowser, KeyValueStore};
use curator_core::services::{SessionListService, ShareService};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionListService>,
    pub share: Arc<ShareService>,
    pub catalog: Arc<dyn CatalogBrowser>,
    /// Probed by the readiness check.
    pub store: Arc<dyn KeyValueStore>,
    /// Default for `inline_icons` when an export request omits it.
    pub inline_icons: bool,
}
