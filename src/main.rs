//! Racing Timer - an always-on-top stopwatch for racing and speedrun timing
//! 
//! This is the main entry point for the racing-timer application.

use tokio::{net::TcpListener, sync::mpsc};
use tracing::{error, info, warn};

use racing_timer::{
    config::Config,
    input::{spawn_global_hook, HookGate},
    presets::PresetTree,
    services::{cue_channel, CuePlayer},
    state::{Action, AppState},
    store::ConfigStore,
    tasks::UiLoop,
    utils::{shutdown_signal, SystemClock},
    create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("racing_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting racing-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: settings={}, tick={}ms, api={}",
          config.config.display(), config.tick_ms, config.address());

    // Audible cues run beside the loop and never block it
    let (cue_tx, cue_rx) = cue_channel();
    tokio::spawn(CuePlayer::new(cue_rx, config.mute).run());

    // Global input hook feeds the UI loop through a channel
    let gate = HookGate::new();
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    if let Err(e) = spawn_global_hook(gate.clone(), input_tx) {
        warn!("Global input unavailable: {}", e);
    }

    let presets = PresetTree::load_or_default(config.presets.as_deref());
    let state = AppState::new(ConfigStore::new(&config.config), presets, gate, cue_tx)
        .with_capture_timeout(config.capture_timeout());

    let (ui_loop, handles) = UiLoop::new(state, SystemClock, config.tick(), input_rx);
    let mut ui_task = tokio::spawn(ui_loop.run());

    let app = create_router(handles.clone());
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control API running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /toggle               - Start or stop the timer");
    info!("  POST /preset               - Select countdown preset");
    info!("  POST /rebind               - Capture a new binding");
    info!("  POST /laps/reset           - Clear lap history");
    info!("  POST /ui/opacity|size      - Window appearance");
    info!("  POST /ui/text-color/cycle  - Next text color");
    info!("  POST /exit                 - Quit");
    info!("  GET  /status, /menu        - Current frame and menu");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        result = &mut ui_task => {
            if let Err(e) = result {
                error!("UI loop failed: {}", e);
            }
            info!("Exit requested");
            return Ok(());
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Let the loop release the hook before the process ends
    if handles.dispatch(Action::Exit).await.is_err() {
        warn!("UI loop already stopped");
    }
    if let Err(e) = ui_task.await {
        error!("UI loop failed: {}", e);
    }

    info!("Shutdown complete");
    Ok(())
}
