//! Request and response bodies

use serde::{Deserialize, Serialize};
use validator::Validate;

use curator_core::domain::{ItemRef, SessionId, SessionList};
use curator_shared::ItemId;

/// Body of `POST /personalized-list` and `PUT /personalized-list/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct SelectionRequest {
    #[serde(default)]
    #[validate(length(max = 200, message = "Too many apps selected"))]
    pub selected_apps: Vec<ItemId>,
}

#[derive(Debug, Serialize)]
pub struct CreatedListResponse {
    pub session_id: SessionId,
    pub message: String,
    pub selected_apps: Vec<ItemRef>,
}

impl From<SessionList> for CreatedListResponse {
    fn from(list: SessionList) -> Self {
        Self {
            session_id: list.session_id,
            message: "Personalized list created".to_string(),
            selected_apps: list.items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: SessionId,
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub session_id: SessionId,
    pub selected_apps: Vec<ItemRef>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
    pub inline_icons: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppListQuery {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ShareUrlResponse {
    pub shareable_url: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_shared::constants::MAX_SELECTED_APPS;

    #[test]
    fn test_selection_limit() {
        let ok = SelectionRequest { selected_apps: vec![1, 2, 3] };
        assert!(ok.validate().is_ok());

        let too_many = SelectionRequest {
            selected_apps: (1..=(MAX_SELECTED_APPS as i64 + 1)).collect(),
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_missing_selection_defaults_to_empty() {
        let req: SelectionRequest = serde_json::from_str("{}").unwrap();
        assert!(req.selected_apps.is_empty());
    }
}
