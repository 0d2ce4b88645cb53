// ============================================================================
// Curator Core - Personalized List Session Service
// File: crates/curator-core/src/services/session_list_service.rs
// ============================================================================
//! TTL-bound storage of selected apps, keyed by an opaque session id.

use std::sync::Arc;
use std::time::Duration;

use curator_shared::constants::MAX_SELECTED_APPS;
use curator_shared::utils::mask_token;
use curator_shared::ItemId;
use tracing::{debug, info, warn};

use crate::domain::{ItemRef, SessionId, SessionList, SessionPayload};
use crate::error::DomainError;
use crate::repositories::{CatalogLookup, KeyValueStore};

/// Session store for personalized app lists.
pub struct SessionListService {
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<dyn CatalogLookup>,
    ttl: Duration,
    key_prefix: String,
}

impl SessionListService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<dyn CatalogLookup>,
        ttl: Duration,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            catalog,
            ttl,
            key_prefix: key_prefix.into(),
        }
    }

    /// Create a session holding the given apps. The selection must not be empty.
    pub async fn create_session(&self, ids: &[ItemId]) -> Result<SessionList, DomainError> {
        if ids.is_empty() {
            warn!("Rejected personalized list: no apps selected");
            return Err(DomainError::EmptySelection);
        }

        let items = self.enrich(ids).await?;
        let session_id = SessionId::new();
        self.write(&session_id, &SessionPayload::new(items.clone())).await?;

        info!(
            "Created personalized list {} with {} apps",
            mask_token(&session_id.to_string()),
            items.len()
        );
        Ok(SessionList { session_id, items })
    }

    /// Create a session with no apps yet.
    pub async fn init_empty(&self) -> Result<SessionId, DomainError> {
        let session_id = SessionId::new();
        self.write(&session_id, &SessionPayload::new(Vec::new())).await?;
        info!("Created empty personalized list {}", mask_token(&session_id.to_string()));
        Ok(session_id)
    }

    /// Overwrite the stored list and re-arm the TTL.
    ///
    /// Nothing is written unless the session is live and every id resolves.
    pub async fn replace_items(
        &self,
        session_id: &SessionId,
        ids: &[ItemId],
    ) -> Result<Vec<ItemRef>, DomainError> {
        let current = self.read(session_id).await?;
        let items = self.enrich(ids).await?;

        self.write(session_id, &current.replaced(items.clone())).await?;

        info!(
            "Replaced personalized list {} with {} apps",
            mask_token(&session_id.to_string()),
            items.len()
        );
        Ok(items)
    }

    pub async fn get_items(&self, session_id: &SessionId) -> Result<Vec<ItemRef>, DomainError> {
        Ok(self.read(session_id).await?.items)
    }

    pub async fn get_payload(&self, session_id: &SessionId) -> Result<SessionPayload, DomainError> {
        self.read(session_id).await
    }

    /// Existence check that never fails; store errors read as "absent".
    pub async fn exists(&self, session_id: &SessionId) -> bool {
        match self.store.exists(&self.key(session_id)).await {
            Ok(found) => found,
            Err(e) => {
                warn!("Session existence check failed: {}", e);
                false
            }
        }
    }

    /// Like `exists`, but a store outage is reported instead of read as absent.
    pub async fn ensure_live(&self, session_id: &SessionId) -> Result<(), DomainError> {
        if self.store.exists(&self.key(session_id)).await? {
            Ok(())
        } else {
            debug!("Session {} not found or expired", mask_token(&session_id.to_string()));
            Err(DomainError::SessionNotFound)
        }
    }

    pub async fn delete(&self, session_id: &SessionId) -> Result<bool, DomainError> {
        let removed = self.store.delete(&self.key(session_id)).await?;
        if removed {
            info!("Deleted personalized list {}", mask_token(&session_id.to_string()));
        }
        Ok(removed)
    }

    /// Resolve ids against the catalog, preserving first-occurrence order.
    async fn enrich(&self, ids: &[ItemId]) -> Result<Vec<ItemRef>, DomainError> {
        let ids = dedup_preserving_order(ids);
        if ids.len() > MAX_SELECTED_APPS {
            return Err(DomainError::ValidationError(format!(
                "At most {} apps can be selected",
                MAX_SELECTED_APPS
            )));
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let resolved = self.catalog.resolve(&ids).await?;

        let missing: Vec<ItemId> = ids
            .iter()
            .copied()
            .filter(|id| !resolved.contains_key(id))
            .collect();
        if !missing.is_empty() {
            warn!("Selection references unknown apps: {:?}", missing);
            return Err(DomainError::UnknownItems(missing));
        }

        Ok(ids
            .iter()
            .filter_map(|id| resolved.get(id))
            .map(ItemRef::from)
            .collect())
    }

    async fn read(&self, session_id: &SessionId) -> Result<SessionPayload, DomainError> {
        let raw = self
            .store
            .get(&self.key(session_id))
            .await?
            .ok_or_else(|| {
                debug!("Session {} not found or expired", mask_token(&session_id.to_string()));
                DomainError::SessionNotFound
            })?;
        SessionPayload::from_json(&raw)
    }

    async fn write(&self, session_id: &SessionId, payload: &SessionPayload) -> Result<(), DomainError> {
        let raw = payload.to_json()?;
        self.store.set_ex(&self.key(session_id), &raw, self.ttl).await
    }

    fn key(&self, session_id: &SessionId) -> String {
        format!("{}{}", self.key_prefix, session_id)
    }
}

fn dedup_preserving_order(ids: &[ItemId]) -> Vec<ItemId> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{CatalogItem, PlatformLinks};
    use crate::repositories::{MockCatalogLookup, MockKeyValueStore};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-test store; `expire_all` stands in for TTL expiry.
    #[derive(Default)]
    pub(crate) struct FakeStore {
        entries: Mutex<HashMap<String, (String, Duration)>>,
    }

    impl FakeStore {
        pub(crate) fn expire_all(&self) {
            self.entries.lock().unwrap().clear();
        }

        pub(crate) fn ttl_of(&self, key: &str) -> Option<Duration> {
            self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
        }

        pub(crate) fn raw(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone())
        }

        pub(crate) fn put_raw(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), Duration::from_secs(60)));
        }
    }

    #[async_trait]
    impl KeyValueStore for FakeStore {
        async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
            Ok(self.raw(key))
        }

        async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), ttl));
            Ok(())
        }

        async fn exists(&self, key: &str) -> Result<bool, DomainError> {
            Ok(self.entries.lock().unwrap().contains_key(key))
        }

        async fn delete(&self, key: &str) -> Result<bool, DomainError> {
            Ok(self.entries.lock().unwrap().remove(key).is_some())
        }

        async fn purge_expired(&self, _prefix: &str) -> Result<usize, DomainError> {
            Ok(0)
        }

        async fn ping(&self) -> Result<(), DomainError> {
            Ok(())
        }
    }

    pub(crate) fn catalog_item(id: ItemId, name: &str, ios: bool, android: bool) -> CatalogItem {
        CatalogItem {
            id,
            name: name.to_string(),
            description: Some(format!("{} description", name)),
            icon_url: Some(format!("https://cdn.example.com/{}.png", id)),
            category: Some("Transport".to_string()),
            country_code: Some("CN".to_string()),
            links: PlatformLinks::new(
                ios.then(|| format!("https://apps.apple.com/app/id{}", id)),
                android.then(|| format!("https://play.google.com/store/apps/details?id=app{}", id)),
                None,
            ),
        }
    }

    /// Catalog mock that knows the given items.
    pub(crate) fn catalog_with(items: Vec<CatalogItem>) -> MockCatalogLookup {
        let known: HashMap<ItemId, CatalogItem> = items.into_iter().map(|i| (i.id, i)).collect();
        let mut catalog = MockCatalogLookup::new();
        catalog.expect_resolve().returning(move |ids| {
            Ok(ids
                .iter()
                .filter_map(|id| known.get(id).map(|item| (*id, item.clone())))
                .collect())
        });
        catalog
    }

    pub(crate) fn service(store: Arc<FakeStore>, catalog: MockCatalogLookup) -> SessionListService {
        SessionListService::new(store, Arc::new(catalog), Duration::from_secs(86_400), "pl:")
    }

    fn default_catalog() -> MockCatalogLookup {
        catalog_with(vec![
            catalog_item(1, "Didi", true, true),
            catalog_item(2, "Alipay", true, false),
            catalog_item(3, "Amap", false, true),
        ])
    }

    #[tokio::test]
    async fn test_create_then_get_returns_enriched_items() {
        let store = Arc::new(FakeStore::default());
        let svc = service(store.clone(), default_catalog());

        let created = svc.create_session(&[2, 1]).await.unwrap();
        let items = svc.get_items(&created.session_id).await.unwrap();

        assert_eq!(items, created.items);
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(items[0].name, "Alipay");
        assert_eq!(
            store.ttl_of(&format!("pl:{}", created.session_id)),
            Some(Duration::from_secs(86_400))
        );
    }

    #[tokio::test]
    async fn test_create_deduplicates_ids() {
        let svc = service(Arc::new(FakeStore::default()), default_catalog());
        let created = svc.create_session(&[3, 1, 3, 1]).await.unwrap();
        assert_eq!(created.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_selection() {
        let svc = service(Arc::new(FakeStore::default()), MockCatalogLookup::new());
        let err = svc.create_session(&[]).await.unwrap_err();
        assert!(matches!(err, DomainError::EmptySelection));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_ids_without_writing() {
        let store = Arc::new(FakeStore::default());
        let svc = service(store.clone(), default_catalog());

        let err = svc.create_session(&[1, 99, 42]).await.unwrap_err();

        match err {
            DomainError::UnknownItems(ids) => assert_eq!(ids, vec![99, 42]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_init_empty_session() {
        let svc = service(Arc::new(FakeStore::default()), MockCatalogLookup::new());
        let id = svc.init_empty().await.unwrap();
        assert!(svc.exists(&id).await);
        assert!(svc.get_items(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_overwrites_instead_of_merging() {
        let svc = service(Arc::new(FakeStore::default()), default_catalog());
        let created = svc.create_session(&[1, 2]).await.unwrap();

        let replaced = svc.replace_items(&created.session_id, &[3]).await.unwrap();
        let items = svc.get_items(&created.session_id).await.unwrap();

        assert_eq!(replaced, items);
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3]);
    }

    #[tokio::test]
    async fn test_replace_keeps_created_at() {
        let svc = service(Arc::new(FakeStore::default()), default_catalog());
        let created = svc.create_session(&[1]).await.unwrap();
        let before = svc.get_payload(&created.session_id).await.unwrap();

        svc.replace_items(&created.session_id, &[2]).await.unwrap();
        let after = svc.get_payload(&created.session_id).await.unwrap();

        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_replace_with_unknown_id_leaves_state_unchanged() {
        let store = Arc::new(FakeStore::default());
        let svc = service(store.clone(), default_catalog());
        let created = svc.create_session(&[1, 2]).await.unwrap();
        let key = format!("pl:{}", created.session_id);
        let before = store.raw(&key);

        let err = svc.replace_items(&created.session_id, &[3, 404]).await.unwrap_err();

        assert!(matches!(err, DomainError::UnknownItems(ref ids) if ids == &vec![404]));
        assert_eq!(store.raw(&key), before);
    }

    #[tokio::test]
    async fn test_replace_on_missing_session_is_not_found() {
        let svc = service(Arc::new(FakeStore::default()), default_catalog());
        let err = svc.replace_items(&SessionId::new(), &[1]).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_replace_with_empty_list_clears_selection() {
        let svc = service(Arc::new(FakeStore::default()), default_catalog());
        let created = svc.create_session(&[1]).await.unwrap();
        svc.replace_items(&created.session_id, &[]).await.unwrap();
        assert!(svc.get_items(&created.session_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expired_and_never_issued_look_the_same() {
        let store = Arc::new(FakeStore::default());
        let svc = service(store.clone(), default_catalog());
        let created = svc.create_session(&[1]).await.unwrap();
        store.expire_all();

        let expired = svc.get_items(&created.session_id).await.unwrap_err();
        let never = svc.get_items(&SessionId::new()).await.unwrap_err();

        assert_eq!(expired.to_string(), never.to_string());
        assert!(expired.is_not_found() && never.is_not_found());
        assert!(!svc.exists(&created.session_id).await);
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_not_reported_as_missing() {
        let store = Arc::new(FakeStore::default());
        let svc = service(store.clone(), MockCatalogLookup::new());
        let id = SessionId::new();
        store.put_raw(&format!("pl:{}", id), "[1, 2]");

        let err = svc.get_items(&id).await.unwrap_err();
        assert!(matches!(err, DomainError::CorruptPayload(_)));
    }

    #[tokio::test]
    async fn test_delete_session() {
        let svc = service(Arc::new(FakeStore::default()), default_catalog());
        let created = svc.create_session(&[1]).await.unwrap();

        assert!(svc.delete(&created.session_id).await.unwrap());
        assert!(!svc.delete(&created.session_id).await.unwrap());
        assert!(svc.get_items(&created.session_id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_exists_swallows_store_errors() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_exists()
            .returning(|_| Err(DomainError::UpstreamUnavailable("connection refused".into())));
        let svc = SessionListService::new(
            Arc::new(store),
            Arc::new(MockCatalogLookup::new()),
            Duration::from_secs(60),
            "",
        );
        assert!(!svc.exists(&SessionId::new()).await);
    }

    #[tokio::test]
    async fn test_ensure_live_reports_store_outage() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_exists()
            .returning(|_| Err(DomainError::UpstreamUnavailable("connection refused".into())));
        let svc = SessionListService::new(
            Arc::new(store),
            Arc::new(MockCatalogLookup::new()),
            Duration::from_secs(60),
            "",
        );
        let err = svc.ensure_live(&SessionId::new()).await.unwrap_err();
        assert!(matches!(err, DomainError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_ensure_live_distinguishes_missing_sessions() {
        let svc = service(Arc::new(FakeStore::default()), MockCatalogLookup::new());
        let id = svc.init_empty().await.unwrap();
        assert!(svc.ensure_live(&id).await.is_ok());
        assert!(svc.ensure_live(&SessionId::new()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_create_accepts_item_with_malformed_catalog_link() {
        let mut broken = catalog_item(5, "Trip", false, true);
        broken.links.ios = Some("apps.apple.com/app/id681752345".to_string());
        broken.icon_url = Some("not a url".to_string());
        let svc = service(Arc::new(FakeStore::default()), catalog_with(vec![broken]));

        let created = svc.create_session(&[5]).await.unwrap();
        let items = svc.get_items(&created.session_id).await.unwrap();

        assert_eq!(items, created.items);
        assert!(items[0].links.ios.is_none());
        assert!(items[0].icon_url.is_none());
        assert!(items[0].links.android.is_some());
    }

    #[tokio::test]
    async fn test_get_propagates_upstream_errors() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Err(DomainError::UpstreamUnavailable("timeout".into())));
        let svc = SessionListService::new(
            Arc::new(store),
            Arc::new(MockCatalogLookup::new()),
            Duration::from_secs(60),
            "",
        );
        let err = svc.get_items(&SessionId::new()).await.unwrap_err();
        assert!(matches!(err, DomainError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_raw_key_without_prefix() {
        let store = Arc::new(FakeStore::default());
        let svc = SessionListService::new(
            store.clone(),
            Arc::new(MockCatalogLookup::new()),
            Duration::from_secs(60),
            "",
        );
        let id = svc.init_empty().await.unwrap();
        assert!(store.raw(&id.to_string()).is_some());
    }
}
