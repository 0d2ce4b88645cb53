//! Catalog repository traits (ports)

use std::collections::HashMap;

use async_trait::async_trait;
use curator_shared::{ItemId, Page};
#[cfg(test)]
use mockall::automock;

use crate::domain::{AppCategory, AppListFilter, CatalogItem};
use crate::error::DomainError;

/// Read-only lookup used to validate and enrich selections.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Ids missing from the catalog are absent from the returned map.
    async fn resolve(&self, ids: &[ItemId]) -> Result<HashMap<ItemId, CatalogItem>, DomainError>;
}

/// Public browsing of the catalog.
#[async_trait]
pub trait CatalogBrowser: Send + Sync {
    async fn list_apps(&self, filter: &AppListFilter) -> Result<Page<CatalogItem>, DomainError>;
    async fn list_categories(&self) -> Result<Vec<AppCategory>, DomainError>;
}
