//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{menu::MenuItem, state::OverlayView};

/// Response to an action endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Frame after the action, absent on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<OverlayView>,
}

impl ApiResponse {
    /// Create an ok response
    pub fn ok(message: String, view: OverlayView) -> Self {
        Self {
            status: "ok".to_string(),
            message,
            timestamp: Utc::now(),
            view: Some(view),
        }
    }

    /// Create an error response
    pub fn error(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
            view: None,
        }
    }
}

/// Current overlay frame with server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub view: OverlayView,
    pub uptime: String,
    pub timestamp: DateTime<Utc>,
}

/// Context menu tree
#[derive(Debug, Clone, Serialize)]
pub struct MenuResponse {
    pub items: Vec<MenuItem>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
