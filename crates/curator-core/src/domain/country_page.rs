// ============================================================================
// Curator Core - Country Page
// File: crates/curator-core/src/domain/country_page.rs
// Description: Browse page listing the apps curated for one country
// ============================================================================

use curator_shared::{ItemId, Page};
use serde::Serialize;

use super::catalog_item::{AppCategory, CatalogItem};
use crate::error::DomainError;

const SEARCH_PLACEHOLDER: &str = "Search for apps...";
const GENERATE_QR_LABEL: &str = "Generate QR Code";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryHeader {
    pub code: String,
    pub flag: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppCard {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub platforms: Vec<&'static str>,
    pub icon: Option<String>,
}

impl From<CatalogItem> for AppCard {
    fn from(item: CatalogItem) -> Self {
        let platforms = item.links.platforms();
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            category: item.category,
            platforms,
            icon: item.icon_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchFilter {
    pub search_placeholder: &'static str,
    pub categories: Vec<String>,
}

/// Initial state of the selection panel; selections live client-side until
/// a personalized list is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedAppsPanel {
    pub selected_apps: Vec<ItemId>,
    pub generate_qr_button: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryPage {
    pub country_header: CountryHeader,
    pub curated_app_categories: Vec<String>,
    pub app_cards: Vec<AppCard>,
    pub total_apps: u64,
    pub page: u32,
    pub per_page: u32,
    pub search_filter: SearchFilter,
    pub selected_apps_panel: SelectedAppsPanel,
}

impl CountryPage {
    /// Normalise a path segment into an upper-case ISO 3166 alpha-2/alpha-3 code.
    pub fn parse_code(raw: &str) -> Result<String, DomainError> {
        let code = raw.trim();
        if (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(code.to_ascii_uppercase())
        } else {
            Err(DomainError::ValidationError(format!(
                "Invalid country code: {}",
                raw
            )))
        }
    }

    pub fn build(code: &str, categories: Vec<AppCategory>, apps: Page<CatalogItem>) -> Self {
        let category_names: Vec<String> = categories.into_iter().map(|c| c.name).collect();

        Self {
            country_header: CountryHeader {
                code: code.to_string(),
                flag: format!("{}.png", code.to_ascii_lowercase()),
                name: code.to_string(),
                description: format!("Explore top apps for {}", code),
            },
            curated_app_categories: category_names.clone(),
            app_cards: apps.items.into_iter().map(AppCard::from).collect(),
            total_apps: apps.total,
            page: apps.page,
            per_page: apps.per_page,
            search_filter: SearchFilter {
                search_placeholder: SEARCH_PLACEHOLDER,
                categories: category_names,
            },
            selected_apps_panel: SelectedAppsPanel {
                selected_apps: Vec::new(),
                generate_qr_button: GENERATE_QR_LABEL,
            },
        }
    }
}
