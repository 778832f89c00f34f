//! HTTP endpoint handlers
//!
//! Every mutating endpoint turns into one [`Action`] for the UI loop and
//! answers with the frame the loop produced.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use tracing::{info, warn};

use super::{
    responses::{ApiResponse, HealthResponse, MenuResponse, StatusResponse},
    ApiState,
};
use crate::{state::Action, tasks::DispatchError};

type ActionResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Forward an action to the UI loop
async fn run_action(state: &ApiState, action: Action) -> ActionResult {
    let name = action.name();
    match state.handles.dispatch(action).await {
        Ok(view) => {
            info!("{} endpoint called", name);
            Ok(Json(ApiResponse::ok(format!("{} applied", name), view)))
        }
        Err(DispatchError::Rejected(e)) => {
            warn!("Rejected {}: {}", name, e);
            Err((StatusCode::BAD_REQUEST, Json(ApiResponse::error(e))))
        }
        Err(DispatchError::Closed) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error("Timer is shutting down".to_string())),
        )),
    }
}

/// Body of POST /preset
#[derive(Debug, Deserialize)]
pub struct PresetRequest {
    #[serde(default)]
    pub seconds: Option<f64>,
}

/// Body of POST /ui/opacity
#[derive(Debug, Deserialize)]
pub struct OpacityRequest {
    pub value: f64,
}

/// Body of POST /ui/size
#[derive(Debug, Deserialize)]
pub struct SizeRequest {
    pub size: String,
}

/// Handle POST /toggle - Start or stop the timer
pub async fn toggle_handler(State(state): State<Arc<ApiState>>) -> ActionResult {
    run_action(&state, Action::Toggle).await
}

/// Handle POST /preset - Select a countdown preset, or count up with null
pub async fn preset_handler(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<PresetRequest>,
) -> ActionResult {
    run_action(&state, Action::SelectPreset { seconds: body.seconds }).await
}

/// Handle POST /rebind - Capture the next key or mouse button
pub async fn rebind_handler(State(state): State<Arc<ApiState>>) -> ActionResult {
    run_action(&state, Action::StartRebind).await
}

/// Handle POST /rebind/cancel - Abandon a capture in progress
pub async fn rebind_cancel_handler(State(state): State<Arc<ApiState>>) -> ActionResult {
    run_action(&state, Action::CancelRebind).await
}

/// Handle POST /laps/reset - Clear the lap history
pub async fn reset_laps_handler(State(state): State<Arc<ApiState>>) -> ActionResult {
    run_action(&state, Action::ResetLaps).await
}

/// Handle POST /ui/opacity
pub async fn opacity_handler(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<OpacityRequest>,
) -> ActionResult {
    run_action(&state, Action::SetOpacity { value: body.value }).await
}

/// Handle POST /ui/size
pub async fn size_handler(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<SizeRequest>,
) -> ActionResult {
    run_action(&state, Action::SetWindowSize { size: body.size }).await
}

/// Handle POST /ui/text-color/cycle
pub async fn text_color_handler(State(state): State<Arc<ApiState>>) -> ActionResult {
    run_action(&state, Action::CycleTextColor).await
}

/// Handle POST /exit - Release the hook and stop the timer
pub async fn exit_handler(State(state): State<Arc<ApiState>>) -> ActionResult {
    run_action(&state, Action::Exit).await
}

/// Handle POST /action - Run any action, as sent by menu entries
pub async fn action_handler(
    State(state): State<Arc<ApiState>>,
    Json(action): Json<Action>,
) -> ActionResult {
    run_action(&state, action).await
}

/// Handle GET /status - Return the current frame
pub async fn status_handler(State(state): State<Arc<ApiState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        view: state.handles.current_view(),
        uptime: state.get_uptime(),
        timestamp: chrono::Utc::now(),
    })
}

/// Handle GET /menu - Return the context menu tree
pub async fn menu_handler(State(state): State<Arc<ApiState>>) -> Json<MenuResponse> {
    Json(MenuResponse {
        items: state.handles.current_menu(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
