// ============================================================================
// Curator Core - Catalog Item Entity
// File: crates/curator-core/src/domain/catalog_item.rs
// Description: Travel app records as exposed by the catalog
// ============================================================================

use curator_shared::{ItemId, Pagination};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store links for an app. Blank strings from the catalog are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PlatformLinks {
    #[serde(rename = "ios_link")]
    #[validate(url)]
    pub ios: Option<String>,

    #[serde(rename = "android_link")]
    #[validate(url)]
    pub android: Option<String>,

    #[serde(rename = "website_link")]
    #[validate(url)]
    pub website: Option<String>,
}

impl PlatformLinks {
    pub fn new(ios: Option<String>, android: Option<String>, website: Option<String>) -> Self {
        Self {
            ios: non_blank(ios),
            android: non_blank(android),
            website: non_blank(website),
        }
    }

    /// Store platforms the app is published on, as shown on app cards.
    pub fn platforms(&self) -> Vec<&'static str> {
        let mut platforms = Vec::with_capacity(2);
        if self.ios.is_some() {
            platforms.push("iOS");
        }
        if self.android.is_some() {
            platforms.push("Android");
        }
        platforms
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Catalog record for a travel app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: Option<String>,
    pub country_code: Option<String>,
    #[serde(flatten)]
    pub links: PlatformLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCategory {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Browse filter for the public app listing.
#[derive(Debug, Clone, Default)]
pub struct AppListFilter {
    pub category: Option<String>,
    /// ISO country code; apps with no country are listed everywhere.
    pub country: Option<String>,
    pub pagination: Pagination,
}
