//! HTTP control module
//! 
//! Local control surface for the overlay: every window and menu action has
//! an endpoint, and the current frame and menu can be read back.

pub mod handlers;
pub mod responses;

use std::{sync::Arc, time::Instant};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::tasks::LoopHandles;
use handlers::*;

/// Shared state for the HTTP handlers
#[derive(Debug)]
pub struct ApiState {
    pub handles: LoopHandles,
    pub start_time: Instant,
}

impl ApiState {
    pub fn new(handles: LoopHandles) -> Self {
        Self {
            handles,
            start_time: Instant::now(),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// Create the HTTP router with all endpoints
pub fn create_router(handles: LoopHandles) -> Router {
    Router::new()
        .route("/toggle", post(toggle_handler))
        .route("/preset", post(preset_handler))
        .route("/rebind", post(rebind_handler))
        .route("/rebind/cancel", post(rebind_cancel_handler))
        .route("/laps/reset", post(reset_laps_handler))
        .route("/ui/opacity", post(opacity_handler))
        .route("/ui/size", post(size_handler))
        .route("/ui/text-color/cycle", post(text_color_handler))
        .route("/exit", post(exit_handler))
        .route("/action", post(action_handler))
        .route("/status", get(status_handler))
        .route("/menu", get(menu_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(ApiState::new(handles)))
}
