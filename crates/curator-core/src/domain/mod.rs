//! # Curator Core - Domain Module
//!
//! Catalog records, country pages, item snapshots and session payloads.

pub mod catalog_item;
pub mod country_page;
pub mod item_ref;
pub mod session;

pub use catalog_item::{AppCategory, AppListFilter, CatalogItem, PlatformLinks};
pub use country_page::{AppCard, CountryPage};
pub use item_ref::ItemRef;
pub use session::{SessionId, SessionList, SessionPayload};
pub use curator_shared::ItemId;
