// ============================================================================
// Curator Core - Personalized List Session
// File: crates/curator-core/src/domain/session.rs
// ============================================================================

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::item_ref::ItemRef;
use crate::error::DomainError;

/// Opaque token addressing a personalized list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for SessionId {
    type Err = DomainError;

    /// A token that cannot be parsed can never have been issued, so it is
    /// reported exactly like an expired one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| DomainError::SessionNotFound)
    }
}

/// Value stored under a session key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SessionPayload {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[validate(nested)]
    pub items: Vec<ItemRef>,
}

impl SessionPayload {
    pub fn new(items: Vec<ItemRef>) -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            items,
        }
    }

    /// Replace the whole list, keeping the original creation time.
    pub fn replaced(self, items: Vec<ItemRef>) -> Self {
        Self {
            created_at: self.created_at,
            updated_at: Utc::now(),
            items,
        }
    }

    pub fn to_json(&self) -> Result<String, DomainError> {
        self.validate()?;
        serde_json::to_string(self).map_err(|e| DomainError::InternalError(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let payload: SessionPayload =
            serde_json::from_str(raw).map_err(|e| DomainError::CorruptPayload(e.to_string()))?;
        payload
            .validate()
            .map_err(|e| DomainError::CorruptPayload(e.to_string()))?;
        Ok(payload)
    }
}

/// A session id together with its current items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionList {
    pub session_id: SessionId,
    pub items: Vec<ItemRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlatformLinks;

    fn item(id: i64, name: &str) -> ItemRef {
        ItemRef {
            id,
            name: name.to_string(),
            description: None,
            icon_url: None,
            category: None,
            links: PlatformLinks::default(),
        }
    }

    #[test]
    fn test_session_id_parse() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_malformed_session_id_is_not_found() {
        let err = "definitely-not-a-uuid".parse::<SessionId>().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_payload_json_roundtrip_keeps_order() {
        let payload = SessionPayload::new(vec![item(3, "Grab"), item(1, "Didi")]);
        let restored = SessionPayload::from_json(&payload.to_json().unwrap()).unwrap();
        assert_eq!(restored, payload);
    }

    #[test]
    fn test_legacy_id_list_payload_is_corrupt() {
        let err = SessionPayload::from_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DomainError::CorruptPayload(_)));
    }

    #[test]
    fn test_payload_with_invalid_item_is_corrupt() {
        let raw = r#"{"created_at":"2026-01-01T00:00:00Z","updated_at":"2026-01-01T00:00:00Z",
            "items":[{"id":1,"name":"","description":null,"icon_url":null,"category":null,
            "ios_link":null,"android_link":null,"website_link":null}]}"#;
        assert!(matches!(
            SessionPayload::from_json(raw),
            Err(DomainError::CorruptPayload(_))
        ));
    }

    #[test]
    fn test_replaced_keeps_created_at() {
        let payload = SessionPayload::new(vec![item(1, "Didi")]);
        let created = payload.created_at;
        let replaced = payload.replaced(vec![item(2, "Meituan")]);
        assert_eq!(replaced.created_at, created);
        assert_eq!(replaced.items.len(), 1);
        assert_eq!(replaced.items[0].id, 2);
    }
}
