//! Control API tests against a running UI loop

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;

use racing_timer::{
    create_router,
    input::HookGate,
    presets::PresetTree,
    services::cue_channel,
    state::AppState,
    store::ConfigStore,
    tasks::UiLoop,
    utils::ManualClock,
};

struct TestApp {
    router: Router,
    clock: ManualClock,
    config: std::path::PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.config);
    }
}

fn spawn_app(tag: &str) -> TestApp {
    let config = std::env::temp_dir().join(format!(
        "racing-timer-api-{}-{}.json",
        tag,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&config);

    let (cues, _) = cue_channel();
    let state = AppState::new(
        ConfigStore::new(&config),
        PresetTree::default(),
        HookGate::new(),
        cues,
    );
    let clock = ManualClock::new(10_000.0);
    let (_inputs, input_rx) = mpsc::unbounded_channel();
    let (ui_loop, handles) = UiLoop::new(state, clock.clone(), Duration::from_millis(1), input_rx);
    tokio::spawn(ui_loop.run());

    TestApp {
        router: create_router(handles),
        clock,
        config,
    }
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let app = spawn_app("health");
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn toggle_records_lap() {
    let app = spawn_app("toggle");
    let (status, body) = send(&app, "POST", "/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["running"], true);

    app.clock.advance(65.4321);
    let (_, body) = send(&app, "POST", "/toggle", None).await;
    assert_eq!(body["view"]["running"], false);
    assert_eq!(body["view"]["time_text"], "01:05.432");
    assert_eq!(body["view"]["laps"][0], "1. 01:05.432");
    assert_eq!(body["view"]["laps"][1], "--:--.---");
}

#[tokio::test]
async fn preset_sets_and_clears_display() {
    let app = spawn_app("preset");
    let (_, body) = send(&app, "POST", "/preset", Some(json!({"seconds": 105}))).await;
    assert_eq!(body["view"]["time_text"], "01:45.000");
    assert_eq!(body["view"]["preset_seconds"], 105.0);

    let (_, body) = send(&app, "POST", "/preset", Some(json!({"seconds": null}))).await;
    assert_eq!(body["view"]["time_text"], "00:00.000");
    assert_eq!(body["view"]["preset_seconds"], Value::Null);

    let (status, body) = send(&app, "POST", "/preset", Some(json!({"seconds": -4}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn countdown_overrun_goes_negative() {
    let app = spawn_app("overrun");
    send(&app, "POST", "/preset", Some(json!({"seconds": 10}))).await;
    send(&app, "POST", "/toggle", None).await;
    app.clock.advance(12.25);
    let (_, body) = send(&app, "POST", "/toggle", None).await;
    assert_eq!(body["view"]["time_text"], "-00:02.250");
    assert_eq!(body["view"]["laps"][0], "1. 00:12.250");
}

#[tokio::test]
async fn ui_endpoints_persist_settings() {
    let app = spawn_app("ui");
    let (status, _) = send(&app, "POST", "/ui/opacity", Some(json!({"value": 0.6}))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "POST", "/ui/size", Some(json!({"size": "350x280"}))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "POST", "/ui/text-color/cycle", None).await;
    assert_eq!(body["view"]["ui"]["text_color"], "#00ffff");

    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(&app.config).unwrap()).unwrap();
    assert_eq!(saved["ui"]["opacity"], 0.6);
    assert_eq!(saved["ui"]["size"], "350x280");
    assert_eq!(saved["ui"]["text_color"], "#00ffff");

    let (status, _) = send(&app, "POST", "/ui/size", Some(json!({"size": "wide"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generic_action_endpoint_runs_menu_actions() {
    let app = spawn_app("action");
    let (_, menu) = send(&app, "GET", "/menu", None).await;
    let reset = menu["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["label"] == "Reset Laps")
        .unwrap()["action"]
        .clone();

    send(&app, "POST", "/toggle", None).await;
    send(&app, "POST", "/toggle", None).await;
    let (status, body) = send(&app, "POST", "/action", Some(reset)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["laps"], json!(["--:--.---", "--:--.---", "--:--.---", "--:--.---", "--:--.---"]));
}

#[tokio::test]
async fn rebind_and_cancel_update_status_line() {
    let app = spawn_app("rebind");
    let (_, body) = send(&app, "POST", "/rebind", None).await;
    assert_eq!(body["view"]["status_text"], "Press NEW Key or Mouse Button...");
    assert_eq!(body["view"]["capturing"], true);

    let (_, body) = send(&app, "POST", "/rebind/cancel", None).await;
    assert_eq!(body["view"]["status_text"], "Bind: F5 (keyboard)");
    assert_eq!(body["view"]["capturing"], false);
}

#[tokio::test]
async fn exit_stops_accepting_actions() {
    let app = spawn_app("exit");
    let (status, _) = send(&app, "POST", "/exit", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/toggle", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "error");

    // The last frame stays readable
    let (status, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["running"], false);
}
