//! Response shapes for navigation, access checks, and gated pages.

use serde::{Deserialize, Serialize};
use thriftersfind_core::NavEntry;
use thriftersfind_core::redirect::PROFILE_PATH;

use crate::users::SessionUser;

#[derive(Debug, Clone, Serialize)]
pub struct NavigationResponse {
    pub role: Option<String>,
    pub items: Vec<NavEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessQuery {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCheckResponse {
    pub path: String,
    pub allowed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    pub path: String,
    pub user: SessionUser,
    pub navigation: Vec<NavEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenialAction {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Body of the "Access Denied" view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDeniedResponse {
    pub error: String,
    pub path: String,
    pub actions: Vec<DenialAction>,
}

impl AccessDeniedResponse {
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            error: "Access Denied".to_string(),
            path: path.into(),
            actions: vec![
                DenialAction {
                    label: "Go Back".to_string(),
                    href: None,
                },
                DenialAction {
                    label: "Go to Profile".to_string(),
                    href: Some(PROFILE_PATH.to_string()),
                },
            ],
        }
    }
}
