// ============================================================================
// Curator Infrastructure - Seed-File Catalog
// File: crates/curator-infrastructure/src/catalog/in_memory_catalog.rs
// ============================================================================

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use curator_core::domain::{AppCategory, AppListFilter, CatalogItem, PlatformLinks};
use curator_core::error::DomainError;
use curator_core::repositories::{CatalogBrowser, CatalogLookup};
use curator_shared::{ItemId, Page};

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    categories: Vec<AppCategory>,
    #[serde(default)]
    apps: Vec<CatalogItem>,
}

/// Immutable catalog held in memory, loaded from a JSON seed file.
pub struct InMemoryCatalog {
    categories: Vec<AppCategory>,
    apps: BTreeMap<ItemId, CatalogItem>,
}

impl InMemoryCatalog {
    pub fn new(categories: Vec<AppCategory>, apps: Vec<CatalogItem>) -> Self {
        let apps = apps
            .into_iter()
            .map(|mut app| {
                app.links = PlatformLinks::new(app.links.ios, app.links.android, app.links.website);
                (app.id, app)
            })
            .collect();

        let mut categories = categories;
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        Self { categories, apps }
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::ConfigError(format!("cannot read catalog seed {}: {}", path.display(), e))
        })?;
        let seed: SeedFile = serde_json::from_str(&raw).map_err(|e| {
            DomainError::ConfigError(format!("invalid catalog seed {}: {}", path.display(), e))
        })?;

        info!(
            "Loaded catalog seed {} ({} apps, {} categories)",
            path.display(),
            seed.apps.len(),
            seed.categories.len()
        );
        Ok(Self::new(seed.categories, seed.apps))
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn resolve(&self, ids: &[ItemId]) -> Result<HashMap<ItemId, CatalogItem>, DomainError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.apps.get(id).map(|app| (*id, app.clone())))
            .collect())
    }
}

#[async_trait]
impl CatalogBrowser for InMemoryCatalog {
    async fn list_apps(&self, filter: &AppListFilter) -> Result<Page<CatalogItem>, DomainError> {
        let mut matching: Vec<&CatalogItem> = self
            .apps
            .values()
            .filter(|app| match filter.category.as_deref() {
                Some(wanted) => app
                    .category
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(wanted)),
                None => true,
            })
            .filter(|app| match (filter.country.as_deref(), app.country_code.as_deref()) {
                (Some(wanted), Some(code)) => code.eq_ignore_ascii_case(wanted),
                _ => true,
            })
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(filter.pagination.offset() as usize)
            .take(filter.pagination.limit() as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, total, filter.pagination))
    }

    async fn list_categories(&self) -> Result<Vec<AppCategory>, DomainError> {
        Ok(self.categories.clone())
    }
}
