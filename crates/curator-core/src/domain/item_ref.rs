// ============================================================================
// Curator Core - Item Reference
// File: crates/curator-core/src/domain/item_ref.rs
// Description: Denormalized snapshot of a catalog item stored in a session
// ============================================================================

use curator_shared::ItemId;
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::{Validate, ValidateUrl};

use super::catalog_item::{non_blank, CatalogItem, PlatformLinks};

/// Display data captured when an app is added to a personalized list.
///
/// Artifacts render from this snapshot only; later catalog edits are not reflected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ItemRef {
    #[validate(range(min = 1))]
    pub id: ItemId,

    #[validate(length(min = 1, max = 255, message = "App name must be between 1 and 255 characters"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(url)]
    pub icon_url: Option<String>,

    pub category: Option<String>,

    #[serde(flatten)]
    #[validate(nested)]
    pub links: PlatformLinks,
}

const MAX_NAME_CHARS: usize = 255;

/// Keeps absolute http(s) URLs only. Catalog rows with a malformed link still
/// produce a storable snapshot, just without that link.
fn web_url(item_id: ItemId, field: &str, value: Option<String>) -> Option<String> {
    let value = non_blank(value)?;
    let lower = value.to_ascii_lowercase();
    let has_scheme = lower.starts_with("http://") || lower.starts_with("https://");
    if has_scheme && value.validate_url() {
        Some(value)
    } else {
        warn!("Dropping malformed {} for app {}: {:?}", field, item_id, value);
        None
    }
}

fn display_name(item: &CatalogItem) -> String {
    let name = item.name.trim();
    if name.is_empty() {
        warn!("App {} has a blank name", item.id);
        return format!("App {}", item.id);
    }
    name.chars().take(MAX_NAME_CHARS).collect()
}

impl From<&CatalogItem> for ItemRef {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id,
            name: display_name(item),
            description: non_blank(item.description.clone()),
            icon_url: web_url(item.id, "icon_url", item.icon_url.clone()),
            category: non_blank(item.category.clone()),
            links: PlatformLinks {
                ios: web_url(item.id, "ios_link", item.links.ios.clone()),
                android: web_url(item.id, "android_link", item.links.android.clone()),
                website: web_url(item.id, "website_link", item.links.website.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_item() -> CatalogItem {
        CatalogItem {
            id: 7,
            name: " Alipay ".to_string(),
            description: Some(String::new()),
            icon_url: Some("https://cdn.example.com/alipay.png".to_string()),
            category: Some("Finance".to_string()),
            country_code: Some("CN".to_string()),
            links: PlatformLinks {
                ios: Some("https://apps.apple.com/app/id333206289".to_string()),
                android: Some(String::new()),
                website: None,
            },
        }
    }

    #[test]
    fn test_snapshot_from_catalog_item() {
        let item = ItemRef::from(&catalog_item());
        assert_eq!(item.id, 7);
        assert_eq!(item.name, "Alipay");
        assert!(item.description.is_none());
        assert!(item.links.android.is_none());
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_link() {
        let mut item = ItemRef::from(&catalog_item());
        item.links.ios = Some("not a url".to_string());
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_malformed_catalog_links_are_dropped_from_snapshot() {
        let mut source = catalog_item();
        source.icon_url = Some("cdn.example.com/alipay.png".to_string());
        source.links.ios = Some("apps.apple.com/app/id647268330".to_string());
        source.links.website = Some("javascript:alert(1)".to_string());
        source.links.android = Some("https://play.google.com/store/apps/details?id=com.eg.android.AlipayGphone".to_string());

        let item = ItemRef::from(&source);
        assert!(item.icon_url.is_none());
        assert!(item.links.ios.is_none());
        assert!(item.links.website.is_none());
        assert!(item.links.android.is_some());
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_blank_or_oversized_name_still_validates() {
        let mut source = catalog_item();
        source.name = "   ".to_string();
        let item = ItemRef::from(&source);
        assert_eq!(item.name, "App 7");
        assert!(item.validate().is_ok());

        source.name = "x".repeat(300);
        let item = ItemRef::from(&source);
        assert_eq!(item.name.chars().count(), 255);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_serialized_shape_uses_link_field_names() {
        let json = serde_json::to_value(ItemRef::from(&catalog_item())).unwrap();
        assert_eq!(json["ios_link"], "https://apps.apple.com/app/id333206289");
        assert!(json["android_link"].is_null());
        assert!(json.get("links").is_none());
    }
}
